//! The FHSIS maternal care indicators

use std::fmt;

use crate::models::LabTestType;

macro_rules! indicators {
    ($($variant:ident => $key:literal, $label:literal;)+) => {
        /// One counted FHSIS indicator
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Indicator {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl Indicator {
            /// Every indicator in report order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable snake_case key
            #[must_use]
            pub const fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }

            /// Description as printed on the report
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Look up an indicator by key
            #[must_use]
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

indicators! {
    Visits4 => "visits4", "Pregnant women with at least 4 prenatal check-ups";
    BmiNormal => "bmi_normal", "Pregnant women seen in the 1st trimester who have normal BMI";
    BmiLow => "bmi_low", "Pregnant women seen in the 1st trimester who have low BMI";
    BmiHigh => "bmi_high", "Pregnant women seen in the 1st trimester who have high BMI";
    Td2PlusFirst => "td2plus_first", "Pregnant women for the first time given at least 2 doses of Td vaccination";
    Td2PlusRepeat => "td2plus_repeat", "Pregnant women for the 2nd or more times given at least 3 doses of Td vaccination (Td2 Plus)";
    Iron => "iron", "Pregnant women who completed the dose of iron with folic acid supplementation";
    Calcium => "calcium", "Pregnant women who completed doses of calcium carbonate supplementation";
    Deworming => "deworming", "Pregnant women given one dose of deworming tablet";
    SyphilisScreen => "syphilis_screen", "Pregnant women screened for syphilis";
    SyphilisPositive => "syphilis_positive", "Pregnant women tested positive for syphilis";
    HepBScreen => "hepb_screen", "Pregnant women screened for Hepatitis B";
    HepBPositive => "hepb_positive", "Pregnant women tested positive for Hepatitis B";
    HivScreen => "hiv_screen", "Pregnant women screened for HIV";
    HivPositive => "hiv_positive", "Pregnant women tested positive for HIV";
    AnemiaScreen => "anemia_screen", "Pregnant women tested for CBC (Hgb and Hct count)";
    AnemiaPositive => "anemia_positive", "Pregnant women tested for CBC (Hgb and Hct) diagnosed with anemia";
    GdScreen => "gd_screen", "Pregnant women screened for gestational diabetes";
    GdPositive => "gd_positive", "Pregnant women tested positive for gestational diabetes";
    Deliveries => "deliveries", "Number of deliveries";
    LiveBirths => "live_births", "Number of live births";
    LbNormal => "lb_normal", "Number of live births with normal birth weight";
    LbLowMale => "lb_low_m", "Number of live births with low birth weight, male";
    LbLowFemale => "lb_low_f", "Number of live births with low birth weight, female";
    LbUnknownMale => "lb_unknown_m", "Number of live births with unknown birth weight, male";
    LbUnknownFemale => "lb_unknown_f", "Number of live births with unknown birth weight, female";
    AttendantMd => "attendant_md", "Number of deliveries attended by a doctor";
    AttendantRn => "attendant_rn", "Number of deliveries attended by a nurse";
    AttendantMw => "attendant_mw", "Number of deliveries attended by midwives";
    FacilityPublic => "facility_public", "Number of deliveries in public health facility";
    FacilityPrivate => "facility_private", "Number of deliveries in private health facility";
    NonFacility => "non_facility", "Number of non-facility-based deliveries";
    DelVaginal => "del_vaginal", "Number of vaginal deliveries";
    DelCs => "del_cs", "Number of deliveries by cesarean section";
    OutcomeFt => "outcome_ft", "Number of full-term births";
    OutcomePt => "outcome_pt", "Number of pre-term births";
    OutcomeFd => "outcome_fd", "Number of fetal deaths";
    OutcomeAb => "outcome_ab", "Number of abortion/miscarriage";
    Pnc2 => "pnc2", "Number of postpartum women together with their newborn who completed at least 2 postpartum check-ups";
    Pnc4 => "pnc4", "Number of postpartum women who completed 4 postpartum check-ups";
    PostpartumIfa => "postpartum_ifa", "Number of postpartum women who completed iron with folic acid supplementation";
    VitA => "vit_a", "Number of postpartum women with Vitamin A supplementation";
    Hypertension => "hypertension", "No. of pregnant women who are diagnosed with hypertension";
    Anc4Delivery => "anc4_delivery", "No. of deliveries with 4 ANC";
    Anc1stTri => "anc1st_tri", "No. of deliveries with 1 ANC during 1st trimester";
    FirstBirth => "first_birth", "No. of women who gave birth for the 1st time";
    GrandMultigravida => "grand_multigravida", "No. of women who gave birth who are Grand Multigravida (G5 and above)";
}

impl Indicator {
    /// Screened and positive indicators for a laboratory test
    #[must_use]
    pub const fn for_lab(test: LabTestType) -> (Self, Self) {
        match test {
            LabTestType::Syphilis => (Self::SyphilisScreen, Self::SyphilisPositive),
            LabTestType::HepatitisB => (Self::HepBScreen, Self::HepBPositive),
            LabTestType::Hiv => (Self::HivScreen, Self::HivPositive),
            LabTestType::Cbc => (Self::AnemiaScreen, Self::AnemiaPositive),
            LabTestType::GestationalDiabetes => (Self::GdScreen, Self::GdPositive),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_keys_are_unique_and_round_trip() {
        assert_eq!(Indicator::ALL.len(), 47);
        let keys: FxHashSet<_> = Indicator::ALL.iter().map(Indicator::key).collect();
        assert_eq!(keys.len(), Indicator::ALL.len());
        for indicator in Indicator::ALL {
            assert_eq!(Indicator::from_key(indicator.key()), Some(*indicator));
        }
    }
}
