use std::time::Duration;

/// Per-entity run counters. Exactly one counter moves per processed
/// record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntityStats {
    pub imported: u64,
    pub skipped: u64,
    pub errors: u64,
    pub deleted: u64,
}

impl EntityStats {
    fn add(&self, other: &EntityStats) -> EntityStats {
        EntityStats {
            imported: self.imported + other.imported,
            skipped: self.skipped + other.skipped,
            errors: self.errors + other.errors,
            deleted: self.deleted + other.deleted,
        }
    }
}

/// Aggregate outcome of one invocation, owned by the orchestrator; no
/// state outlives the run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub companies: EntityStats,
    pub vessels: EntityStats,
    pub ports: EntityStats,
    pub airports: EntityStats,
}

impl RunReport {
    pub fn total(&self) -> EntityStats {
        self.companies
            .add(&self.vessels)
            .add(&self.ports)
            .add(&self.airports)
    }

    /// Final aggregate report, printed even when sources or individual
    /// records failed.
    pub fn print_summary(&self, elapsed: Duration) {
        println!("\nImport summary ({:.1}s)", elapsed.as_secs_f64());
        for (label, stats) in [
            ("shipping companies", &self.companies),
            ("vessels", &self.vessels),
            ("ports", &self.ports),
            ("airports", &self.airports),
        ] {
            println!(
                "  {:18} imported {:>6}  skipped {:>6}  errors {:>4}  deleted {:>6}",
                label, stats.imported, stats.skipped, stats.errors, stats.deleted
            );
        }
        let total = self.total();
        println!(
            "  {:18} imported {:>6}  skipped {:>6}  errors {:>4}  deleted {:>6}",
            "total", total.imported, total.skipped, total.errors, total.deleted
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_all_entities() {
        let report = RunReport {
            companies: EntityStats {
                imported: 2,
                skipped: 1,
                errors: 0,
                deleted: 0,
            },
            vessels: EntityStats {
                imported: 3,
                skipped: 0,
                errors: 1,
                deleted: 4,
            },
            ..Default::default()
        };
        let total = report.total();
        assert_eq!(total.imported, 5);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.errors, 1);
        assert_eq!(total.deleted, 4);
    }
}
