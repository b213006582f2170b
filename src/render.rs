//! Plain-text views of the world and the final report.

use std::fmt;

use crate::{
    cell::Terrain,
    chronicle::Chronicle,
    civilization::Civilization,
    engine::FinalReport,
    world::World,
};

const RULE_WIDTH: usize = 60;

/// ASCII map: owned cells show their owner's number, the rest their terrain.
pub struct MapView<'a> {
    pub world: &'a World,
    pub civilizations: &'a [Civilization],
}

impl fmt::Display for MapView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.world.size());
        writeln!(f, "=== {} ===", self.world.date())?;
        writeln!(f, "+{border}+")?;
        for row in self.world.rows() {
            let line: String = row
                .iter()
                .map(|cell| match cell.owner() {
                    Some(owner) => marker(owner.index()),
                    None => cell.terrain().glyph(),
                })
                .collect();
            writeln!(f, "|{line}|")?;
        }
        writeln!(f, "+{border}+")?;
        let legend: Vec<String> = Terrain::ALL
            .iter()
            .map(|terrain| format!("{} {}", terrain.glyph(), terrain.label()))
            .collect();
        write!(f, "Legend: {}", legend.join(", "))?;
        for civ in self.civilizations {
            write!(f, "\n  {} = {}'s territory", marker(civ.id().index()), civ.name())?;
        }
        Ok(())
    }
}

fn marker(index: usize) -> char {
    char::from_digit((index as u32 + 1) % 36, 36).unwrap_or('?')
}

/// One-line status of a civilization.
pub struct StatusLine<'a>(pub &'a Civilization);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let civ = self.0;
        if let Some(fall) = civ.fall() {
            return write!(f, "{} [COLLAPSED - {} in {}]", civ.name(), fall.cause, fall.date);
        }
        write!(
            f,
            "{} | Pop: {} | Food: {:.0} | Morale: {:.0}% | Tech: {} | Territory: {} | State: {} | \
             Trait: {}",
            civ.name(),
            civ.population(),
            civ.food(),
            civ.morale(),
            civ.tech_level(),
            civ.territory().len(),
            civ.state(),
            civ.temperament()
        )
    }
}

/// Major milestones plus totals.
pub struct ChronicleSummary<'a>(pub &'a Chronicle);

impl fmt::Display for ChronicleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chronicle = self.0;
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "         CHRONICLE OF THE REALM")?;
        writeln!(f, "{rule}")?;
        let mut major = chronicle.major().peekable();
        if major.peek().is_none() {
            writeln!(f, "No major events occurred during this period.")?;
        } else {
            writeln!(f, "Major Events:")?;
            for entry in major {
                writeln!(f, "Year {}: {}", entry.year, entry.text)?;
            }
        }
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(f, "Total events recorded: {}", chronicle.len())?;
        writeln!(f, "Major milestones: {}", chronicle.major().count())?;
        write!(f, "{rule}")
    }
}

/// Everything printed once a run ends.
pub struct ReportView<'a>(pub &'a FinalReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "              SIMULATION COMPLETE")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{}",
            MapView {
                world: &report.world,
                civilizations: &report.civilizations,
            }
        )?;
        writeln!(f)?;
        writeln!(f, "Final Civilization Status:")?;
        for civ in &report.civilizations {
            writeln!(f, "  {}", StatusLine(civ))?;
        }
        writeln!(f)?;

        let survivors = report.survivors().count();
        match (survivors, report.dominant()) {
            (1, Some(winner)) => {
                writeln!(f, "*** {} is the sole surviving civilization! ***", winner.name())?
            }
            (_, Some(winner)) => writeln!(
                f,
                "*** {} dominates with {} territories! ***",
                winner.name(),
                winner.territory().len()
            )?,
            (_, None) => writeln!(f, "*** No civilizations survived. The world is empty. ***")?,
        }
        writeln!(f)?;
        write!(f, "{}", ChronicleSummary(&report.chronicle))
    }
}
