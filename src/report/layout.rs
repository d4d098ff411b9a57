//! Template lines

use crate::algorithm::derived::AgeBand;
use crate::algorithm::indicators::{Indicator, IndicatorReport};
use crate::sink::Cell;

/// What a template line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Label only
    Heading,
    /// Age-band counts of one indicator
    Counts(Indicator),
    /// Male and female totals, rendered as a `Male`/`Female` caption row
    /// followed by `[male, 0, female, sum]`
    BySex { male: Indicator, female: Indicator },
}

/// One labelled line of a report template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub label: &'static str,
    pub kind: LineKind,
}

impl Line {
    /// Indicators this line reports
    #[must_use]
    pub fn indicators(&self) -> Vec<Indicator> {
        match self.kind {
            LineKind::Heading => Vec::new(),
            LineKind::Counts(indicator) => vec![indicator],
            LineKind::BySex { male, female } => vec![male, female],
        }
    }

    /// Table rows for this line
    #[must_use]
    pub fn render(&self, report: &IndicatorReport) -> Vec<Vec<Cell>> {
        let label = Cell::text(self.label);
        match self.kind {
            LineKind::Heading => vec![vec![label, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]],
            LineKind::Counts(indicator) => {
                let counts = report.get(indicator);
                let mut row = vec![label];
                row.extend(AgeBand::ALL.iter().map(|band| Cell::from(counts.band(*band))));
                row.push(Cell::from(counts.total));
                vec![row]
            }
            LineKind::BySex { male, female } => {
                let male = report.get(male).total;
                let female = report.get(female).total;
                vec![
                    vec![label, Cell::from("Male"), Cell::Empty, Cell::from("Female"), Cell::Empty],
                    vec![
                        Cell::Empty,
                        Cell::from(male),
                        Cell::from(0u64),
                        Cell::from(female),
                        Cell::from(male + female),
                    ],
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_sex_rows() {
        let line = Line {
            label: "low",
            kind: LineKind::BySex {
                male: Indicator::LbLowMale,
                female: Indicator::LbLowFemale,
            },
        };
        let rows = line.render(&IndicatorReport::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], Cell::Text("Male".to_string()));
        assert_eq!(rows[1][4], Cell::Integer(0));
    }
}
