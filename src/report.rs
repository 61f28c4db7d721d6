//! Score reports and plan rendering.
//!
//! A [`ScoreReport`] accounts for every relationship exactly once: a
//! positive relationship is either *satisfied* (pair seated together) or
//! *missed*; an `avoid` relationship is either *respected* (pair apart)
//! or *violated*. Per-table [`TableStats`] summarize pair affinities and
//! grade each table from A to F.

use std::fmt::{self, Write as _};

use crate::engine::objective::{Objective, EPSILON};
use crate::engine::{SeatingConfig, SeatingProblem, SeatingResult};
use crate::models::{Assignment, TableId};

/// Letter grade for a table's mean pair affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Grades a mean pair affinity.
    ///
    /// | Grade | Mean |
    /// |---|---|
    /// | A | ≥ 0.5 |
    /// | B | ≥ 0.3 |
    /// | C | ≥ 0.16 |
    /// | D | ≥ 0.04 |
    /// | F | below |
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 0.5 {
            Grade::A
        } else if mean >= 0.3 {
            Grade::B
        } else if mean >= 0.16 {
            Grade::C
        } else if mean >= 0.04 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(s)
    }
}

/// Pair statistics for one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableStats {
    pub table: TableId,
    pub seated: usize,
    pub capacity: usize,
    /// Unordered pairs at the table.
    pub pair_count: usize,
    pub positive_pairs: usize,
    pub negative_pairs: usize,
    pub neutral_pairs: usize,
    /// Sum of pair affinities.
    pub total: f64,
    /// `total / pair_count`, or 0 without pairs.
    pub mean: f64,
    /// `None` for tables with fewer than two guests.
    pub grade: Option<Grade>,
}

/// Quality summary of an assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreReport {
    /// `affinity_total - balance_penalty`; the quantity the engine maximizes.
    pub objective: f64,
    /// Sum of affinities over co-seated pairs.
    pub affinity_total: f64,
    /// Table-size balancing penalty (0 when balancing is off).
    pub balance_penalty: f64,
    pub satisfied_weight: f64,
    pub satisfied_count: usize,
    pub missed_weight: f64,
    pub missed_count: usize,
    pub violated_weight: f64,
    pub violated_count: usize,
    pub respected_weight: f64,
    pub respected_count: usize,
    /// One entry per table, ordered by table id.
    pub tables: Vec<TableStats>,
}

impl ScoreReport {
    /// Scores `assignment` under `config`.
    ///
    /// Guests missing from the assignment count as seated nowhere.
    pub fn evaluate(
        problem: &SeatingProblem,
        config: &SeatingConfig,
        assignment: &Assignment,
    ) -> Self {
        Self::with_objective(problem, &Objective::new(problem, config), assignment)
    }

    pub(crate) fn with_objective(
        problem: &SeatingProblem,
        objective: &Objective,
        assignment: &Assignment,
    ) -> Self {
        let mut report = ScoreReport {
            objective: 0.0,
            affinity_total: 0.0,
            balance_penalty: 0.0,
            satisfied_weight: 0.0,
            satisfied_count: 0,
            missed_weight: 0.0,
            missed_count: 0,
            violated_weight: 0.0,
            violated_count: 0,
            respected_weight: 0.0,
            respected_count: 0,
            tables: Vec::with_capacity(problem.table_count()),
        };

        for rel in problem.relationships() {
            let together = assignment.seated_together(rel.a, rel.b);
            match (rel.kind.is_positive(), together) {
                (true, true) => {
                    report.satisfied_weight += rel.strength;
                    report.satisfied_count += 1;
                }
                (true, false) => {
                    report.missed_weight += rel.strength;
                    report.missed_count += 1;
                }
                (false, true) => {
                    report.violated_weight += rel.strength;
                    report.violated_count += 1;
                }
                (false, false) => {
                    report.respected_weight += rel.strength;
                    report.respected_count += 1;
                }
            }
        }

        let mut occupancy = Vec::with_capacity(problem.table_count());
        for table in problem.tables() {
            let members: Vec<usize> = assignment
                .guests_at(table.id)
                .into_iter()
                .filter_map(|g| problem.guest_index(g))
                .collect();
            let stats = table_stats(objective, table.id, table.capacity, &members);
            report.affinity_total += stats.total;
            occupancy.push(stats.seated);
            report.tables.push(stats);
        }

        report.balance_penalty = objective.balance_penalty(&occupancy);
        report.objective = report.affinity_total - report.balance_penalty;
        report
    }

    /// Stats for one table.
    pub fn table(&self, id: TableId) -> Option<&TableStats> {
        self.tables.iter().find(|t| t.table == id)
    }
}

fn table_stats(
    objective: &Objective,
    table: TableId,
    capacity: usize,
    members: &[usize],
) -> TableStats {
    let affinity = objective.affinity();
    let mut stats = TableStats {
        table,
        seated: members.len(),
        capacity,
        pair_count: 0,
        positive_pairs: 0,
        negative_pairs: 0,
        neutral_pairs: 0,
        total: 0.0,
        mean: 0.0,
        grade: None,
    };

    for (k, &i) in members.iter().enumerate() {
        for &j in &members[k + 1..] {
            let w = affinity.get(i, j);
            stats.pair_count += 1;
            stats.total += w;
            if w > EPSILON {
                stats.positive_pairs += 1;
            } else if w < -EPSILON {
                stats.negative_pairs += 1;
            } else {
                stats.neutral_pairs += 1;
            }
        }
    }

    if stats.pair_count > 0 {
        stats.mean = stats.total / stats.pair_count as f64;
        stats.grade = Some(Grade::from_mean(stats.mean));
    }
    stats
}

impl fmt::Display for ScoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Objective: {:.2}", self.objective)?;
        writeln!(
            f,
            "Satisfied: {} ({:.2})  Missed: {} ({:.2})",
            self.satisfied_count, self.satisfied_weight, self.missed_count, self.missed_weight
        )?;
        writeln!(
            f,
            "Avoid respected: {} ({:.2})  Violated: {} ({:.2})",
            self.respected_count, self.respected_weight, self.violated_count, self.violated_weight
        )?;
        if self.balance_penalty > 0.0 {
            writeln!(f, "Balance penalty: {:.2}", self.balance_penalty)?;
        }
        Ok(())
    }
}

/// Renders a seating plan as plain text: one block per table, then the
/// overall score.
///
/// # Examples
///
/// ```
/// use u_seating::engine::{SeatingConfig, SeatingProblem, SeatingRunner};
/// use u_seating::models::{Guest, Table};
/// use u_seating::report::render;
///
/// let guests = vec![Guest::new(1, "Alice").with_age(25)];
/// let tables = vec![Table::new(1, "Head Table", 8)];
/// let problem = SeatingProblem::new(&guests, &tables, &[]).unwrap();
/// let result = SeatingRunner::run(&problem, &SeatingConfig::default());
/// let text = render(&problem, &result);
/// assert!(text.contains("  - Alice (age 25)"));
/// ```
pub fn render(problem: &SeatingProblem, result: &SeatingResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_plan(&mut out, problem, result);
    out
}

fn write_plan(
    out: &mut String,
    problem: &SeatingProblem,
    result: &SeatingResult,
) -> fmt::Result {
    const TITLE: &str = "Wedding Table Seating Arrangement";
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;
    writeln!(out)?;

    for table in problem.tables() {
        let seated = result.assignment.guests_at(table.id);
        writeln!(out, "Table {}: {}", table.id, table.name)?;
        let count = seated.len();
        writeln!(out, "Capacity: {}, Seated: {count}", table.capacity)?;
        if let Some(location) = &table.location {
            writeln!(out, "Location: {location}")?;
        }
        if let Some(grade) = result.report.table(table.id).and_then(|s| s.grade) {
            writeln!(out, "Grade: {grade}")?;
        }

        if seated.is_empty() {
            writeln!(out, "No guests assigned")?;
        } else {
            writeln!(out, "Guests:")?;
            for id in seated {
                let Some(guest) = problem.guest_index(id).map(|g| &problem.guests()[g]) else {
                    continue;
                };
                write!(out, "  - {}", guest.name)?;
                if let Some(age) = guest.age {
                    write!(out, " (age {age})")?;
                }
                if let Some(note) = &guest.dietary_restrictions {
                    write!(out, " [dietary: {note}]")?;
                }
                writeln!(out)?;
            }
        }
        writeln!(out)?;
    }

    write!(out, "{}", result.report)?;
    writeln!(out, "Overall Score: {:.2}", result.objective())
}
