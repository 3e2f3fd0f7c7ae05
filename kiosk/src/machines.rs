use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum MachineKind {
    Washer,
    Dryer,
}

impl MachineKind {
    /// Default cycle length shown on machine cards and cart lines.
    pub fn default_cycle(&self) -> &'static str {
        match self {
            MachineKind::Washer => "10 mins",
            MachineKind::Dryer => "30 mins",
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MachineKind::Washer => write!(f, "Washer"),
            MachineKind::Dryer => write!(f, "Dryer"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum MachineStatus {
    Available,
    InUse { remaining_secs: u32 },
    OutOfOrder,
}

impl MachineStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, MachineStatus::Available)
    }

    /// Status badge text, with remaining time for busy machines,
    /// e.g. `In Use (-15:30)`.
    pub fn label(&self) -> String {
        match self {
            MachineStatus::Available => "Available".to_owned(),
            MachineStatus::InUse { remaining_secs } => {
                format!(
                    "In Use (-{:02}:{:02})",
                    remaining_secs / 60,
                    remaining_secs % 60
                )
            }
            MachineStatus::OutOfOrder => "Out of Order".to_owned(),
        }
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MachineStatus::Available => write!(f, "available"),
            MachineStatus::InUse { .. } => write!(f, "in use"),
            MachineStatus::OutOfOrder => write!(f, "out of order"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Machine {
    pub id: u32,
    pub name: String,
    pub kind: MachineKind,
    pub status: MachineStatus,
    pub price: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MachineFilter {
    #[default]
    All,
    Washers,
    Dryers,
    Available,
}

impl MachineFilter {
    pub fn matches(&self, machine: &Machine) -> bool {
        match self {
            MachineFilter::All => true,
            MachineFilter::Washers => machine.kind == MachineKind::Washer,
            MachineFilter::Dryers => machine.kind == MachineKind::Dryer,
            MachineFilter::Available => machine.status.is_available(),
        }
    }
}

impl FromStr for MachineFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(MachineFilter::All),
            "washers" => Ok(MachineFilter::Washers),
            "dryers" => Ok(MachineFilter::Dryers),
            "available" => Ok(MachineFilter::Available),
            other => Err(format!("unknown machine filter: {other}")),
        }
    }
}

/// The machine roster of one laundromat location.
pub struct Roster {
    machines: Vec<Machine>,
}

impl Roster {
    /// The stock roster of the mock location.
    pub fn builtin() -> Self {
        let machine = |id, name: &str, kind, status, price| Machine {
            id,
            name: name.to_owned(),
            kind,
            status,
            price,
        };

        use MachineKind::{Dryer, Washer};
        use MachineStatus::{Available, InUse, OutOfOrder};
        Self {
            machines: vec![
                machine(1, "Washer 99", Washer, Available, 4.99),
                machine(2, "Washer 99", Washer, InUse { remaining_secs: 930 }, 4.99),
                machine(3, "Washer 99", Washer, Available, 4.99),
                machine(4, "Washer 99", Washer, OutOfOrder, 4.99),
                machine(5, "Dryer 15", Dryer, Available, 3.99),
                machine(6, "Dryer 16", Dryer, InUse { remaining_secs: 525 }, 3.99),
                machine(7, "Washer 101", Washer, Available, 4.99),
                machine(8, "Dryer 17", Dryer, Available, 3.99),
            ],
        }
    }

    /// Loads a roster from a headerless CSV of
    /// `id,name,kind,status,price,remaining_secs` rows. Rows that fail to
    /// parse are skipped.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, csv::Error> {
        type Row = (u32, String, String, String, f64, Option<u32>);

        let machines = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)?
            .deserialize()
            .filter_map(|record: Result<Row, _>| record.ok())
            .filter_map(Self::machine_from_row)
            .collect();
        Ok(Self { machines })
    }

    fn machine_from_row(
        (id, name, kind, status, price, remaining_secs): (
            u32,
            String,
            String,
            String,
            f64,
            Option<u32>,
        ),
    ) -> Option<Machine> {
        let kind = match kind.as_str() {
            "Washer" => MachineKind::Washer,
            "Dryer" => MachineKind::Dryer,
            _ => return None,
        };
        let status = match status.as_str() {
            "Available" => MachineStatus::Available,
            "In Use" => MachineStatus::InUse {
                remaining_secs: remaining_secs?,
            },
            "Out of Order" => MachineStatus::OutOfOrder,
            _ => return None,
        };
        Some(Machine {
            id,
            name,
            kind,
            status,
            price,
        })
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Machine> {
        self.machines.iter()
    }

    pub fn find(&self, id: u32) -> Option<&Machine> {
        self.machines.iter().find(|m| m.id == id)
    }

    pub fn filtered(&self, filter: MachineFilter) -> Vec<&Machine> {
        self.machines.iter().filter(|m| filter.matches(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_roster_filters() {
        let roster = Roster::builtin();
        assert_eq!(roster.len(), 8);
        assert_eq!(roster.filtered(MachineFilter::All).len(), 8);
        assert_eq!(roster.filtered(MachineFilter::Washers).len(), 5);
        assert_eq!(roster.filtered(MachineFilter::Dryers).len(), 3);
        assert_eq!(roster.filtered(MachineFilter::Available).len(), 5);
    }

    #[test]
    fn status_labels() {
        assert_eq!(MachineStatus::Available.label(), "Available");
        assert_eq!(
            MachineStatus::InUse { remaining_secs: 930 }.label(),
            "In Use (-15:30)"
        );
        assert_eq!(
            MachineStatus::InUse { remaining_secs: 525 }.label(),
            "In Use (-08:45)"
        );
        assert_eq!(MachineStatus::OutOfOrder.label(), "Out of Order");
    }

    #[test]
    fn filter_from_str() {
        assert_eq!("Washers".parse(), Ok(MachineFilter::Washers));
        assert_eq!("available".parse(), Ok(MachineFilter::Available));
        assert!("laundry".parse::<MachineFilter>().is_err());
    }

    #[test]
    fn csv_loading_skips_malformed_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,Washer 99,Washer,Available,4.99,").unwrap();
        writeln!(file, "2,Dryer 15,Dryer,In Use,3.99,525").unwrap();
        writeln!(file, "not-an-id,Washer 12,Washer,Available,4.99,").unwrap();
        writeln!(file, "3,Mangler 1,Mangler,Available,9.99,").unwrap();
        writeln!(file, "4,Dryer 16,Dryer,In Use,3.99,").unwrap();

        let roster = Roster::from_csv_file(file.path()).unwrap();
        assert_eq!(roster.len(), 2, "bad id, bad kind and busy-without-time skipped");
        assert_eq!(roster.find(1).unwrap().kind, MachineKind::Washer);
        assert_eq!(
            roster.find(2).unwrap().status,
            MachineStatus::InUse { remaining_secs: 525 }
        );
        assert!(roster.find(3).is_none());
    }
}
