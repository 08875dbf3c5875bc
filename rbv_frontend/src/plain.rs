//! Non-interactive frontend: every checkpoint is printed as an indented
//! preorder dump instead of being animated.

use crate::error::FrontendResult;
use crate::input::parse_key;
use crate::recorder::Recorder;
use rbv_tree::RBTree;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Inserts `key` and writes one block per checkpoint.
pub fn insert_and_print<W: Write>(tree: &mut RBTree<i64>, key: i64, out: &mut W) -> FrontendResult<()> {
    let mut recorder = Recorder::new();
    tree.insert_observed(key, &mut recorder);
    debug!(key, checkpoints = recorder.len(), "inserted");

    writeln!(out, "== insert {key}")?;
    for checkpoint in recorder.checkpoints() {
        writeln!(out, "-- {}", checkpoint.describe())?;
        write!(out, "{}", checkpoint.snapshot)?;
    }
    Ok(())
}

/// Inserts `keys` in order into a fresh tree.
pub fn run_plain<W: Write>(keys: &[i64], out: &mut W) -> FrontendResult<RBTree<i64>> {
    let mut tree = RBTree::with_capacity(keys.len());
    for &key in keys {
        insert_and_print(&mut tree, key, out)?;
    }
    out.flush()?;
    Ok(tree)
}

/// Reads one key per line. Blank lines are skipped; a line that is not a
/// key is reported and the run continues.
pub fn run_plain_lines<R: BufRead, W: Write>(input: R, out: &mut W) -> FrontendResult<RBTree<i64>> {
    let mut tree = RBTree::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_key(&line) {
            Ok(key) => insert_and_print(&mut tree, key, out)?,
            Err(e) => {
                warn!(error = %e, "skipping line");
                writeln!(out, "error: {e}")?;
            }
        }
    }
    out.flush()?;
    Ok(tree)
}
