// Aggregation strategies
//
// One pipeline, four interchangeable strategies. Each strategy turns the
// token streams extracted from the input into ordered occurrence records
// and hands them to the result table builder.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, PrimaryKeywordRule};
use crate::table::ResultTable;
use crate::token::{dedup_first_seen, is_keyword, tokenize, tokenize_cell, DEFAULT_DELIMITER};

/// Separator used when joining a grid's unique tokens into one cell.
pub const JOIN_SEPARATOR: &str = " | ";

/// The selected aggregation mode governing how tokens become output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Global `{token, count}` ranking across all input.
    FrequencyCount,
    /// One `{grid_name, joined_tokens}` record per non-empty grid.
    UniqueListPerGroup,
    /// One `{primary_keyword, joined_tokens}` record per non-empty grid.
    PrimaryKeywordPerGroup,
    /// One bare `{joined_tokens}` record per non-empty grid, no header.
    UniqueListUnlabeled,
}

/// Knobs shared by every strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Delimiter splitting composite cells into tokens.
    pub delimiter: char,
    /// When set, purely numeric/percentage tokens are dropped before
    /// aggregation. Off by default: the historical tool only wired the
    /// numeric gate into its primary-keyword variant.
    pub keywords_only: bool,
    /// Where each grid's primary keyword lives.
    pub primary_rule: PrimaryKeywordRule,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            keywords_only: false,
            primary_rule: PrimaryKeywordRule::default(),
        }
    }
}

/// Terminal state of one pipeline invocation.
///
/// `NoTokens` is a normal outcome, not an error: the input parsed fine but
/// produced nothing to aggregate, so no artifact is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Table(ResultTable),
    NoTokens,
}

impl Outcome {
    pub fn into_table(self) -> Option<ResultTable> {
        match self {
            Outcome::Table(table) => Some(table),
            Outcome::NoTokens => None,
        }
    }
}

/// Run the selected strategy over a set of named grids.
pub fn consolidate_grids(grids: &[Grid], strategy: Strategy, opts: &PipelineOptions) -> Outcome {
    match strategy {
        Strategy::FrequencyCount => {
            frequency(grids.iter().flat_map(|grid| grid_tokens(grid, opts)))
        }
        Strategy::UniqueListPerGroup => {
            let records = per_grid(grids, opts, |grid, _| grid.name.clone());
            if records.is_empty() {
                Outcome::NoTokens
            } else {
                Outcome::Table(ResultTable::per_group(records))
            }
        }
        Strategy::PrimaryKeywordPerGroup => {
            let records = per_grid(grids, opts, |grid, opts| opts.primary_rule.extract(grid));
            if records.is_empty() {
                Outcome::NoTokens
            } else {
                Outcome::Table(ResultTable::primary_keyword(records))
            }
        }
        Strategy::UniqueListUnlabeled => {
            let records: Vec<String> = per_grid(grids, opts, |_, _| String::new())
                .into_iter()
                .map(|(_, joined)| joined)
                .collect();
            if records.is_empty() {
                Outcome::NoTokens
            } else {
                Outcome::Table(ResultTable::unlabeled(records))
            }
        }
    }
}

/// Run the frequency count over a flat text blob: one line at a time, each
/// line tokenized like a cell.
pub fn consolidate_text(text: &str, opts: &PipelineOptions) -> Outcome {
    frequency(
        text.lines()
            .flat_map(|line| tokenize(line, opts.delimiter))
            .filter(|token| !opts.keywords_only || is_keyword(token)),
    )
}

/// All tokens of one grid, in the grid's row-major flattening order, with
/// the numeric gate applied when requested.
fn grid_tokens(grid: &Grid, opts: &PipelineOptions) -> Vec<String> {
    grid.values()
        .flat_map(|cell| tokenize_cell(cell, opts.delimiter))
        .filter(|token| !opts.keywords_only || is_keyword(token))
        .collect()
}

/// Shared walk for the per-grid strategies: the label is computed for every
/// grid (a failed primary-keyword lookup still yields a record), but grids
/// with zero tokens are skipped entirely — they never produce a blank row.
fn per_grid(
    grids: &[Grid],
    opts: &PipelineOptions,
    label: impl Fn(&Grid, &PipelineOptions) -> String,
) -> Vec<(String, String)> {
    let mut records = Vec::new();
    for grid in grids {
        let label = label(grid, opts);
        let tokens = grid_tokens(grid, opts);
        if tokens.is_empty() {
            continue;
        }
        records.push((label, dedup_first_seen(tokens).join(JOIN_SEPARATOR)));
    }
    records
}

/// Count occurrences of each distinct token. Output is ordered by
/// descending count; ties break on first-encountered position, so the
/// ranking is deterministic for a given input.
fn frequency(tokens: impl IntoIterator<Item = String>) -> Outcome {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for token in tokens {
        let entry = counts.entry(token).or_insert_with(|| {
            let rank = next_rank;
            next_rank += 1;
            (0, rank)
        });
        entry.0 += 1;
    }

    if counts.is_empty() {
        return Outcome::NoTokens;
    }

    let mut records: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first_seen))| (token, count, first_seen))
        .collect();
    records.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    Outcome::Table(ResultTable::frequency(
        records
            .into_iter()
            .map(|(token, count, _)| (token, count))
            .collect(),
    ))
}
