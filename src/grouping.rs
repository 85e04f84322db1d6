//! Sliding-window grouping of tooth numbers.
//!
//! Teeth are grouped with their right-hand neighbours in the same quadrant
//! (decade), up to three teeth per group. Each start position contributes
//! every prefix of its run, so `[14, 15, 16]` yields `[14, 15]`,
//! `[14, 15, 16]` and `[15, 16]`. The groups overlap on purpose: each one
//! becomes its own candidate box and class.

use std::fmt;

use clap::ValueEnum;

use crate::ir::ToothId;

/// Largest number of teeth in one group.
pub const MAX_GROUP_SIZE: usize = 3;

/// When a single tooth is emitted as a group of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SingletonPolicy {
    /// Only teeth with no same-decade neighbour in the image.
    #[default]
    Isolated,
    /// Every tooth, ahead of the groups that start at it.
    Always,
    /// Never; isolated teeth produce no label.
    Never,
}

/// An ascending run of one to three same-decade tooth numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ToothGroup(Vec<ToothId>);

impl ToothGroup {
    pub fn teeth(&self) -> &[ToothId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The class label for this group: tooth numbers joined by `-`.
    pub fn label(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for ToothGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

/// Groups tooth numbers into overlapping same-decade windows.
///
/// The input may be unsorted and contain duplicates; both are normalized
/// first. Output order follows the sorted start position, shorter windows
/// before longer ones.
pub fn group_teeth(
    ids: impl IntoIterator<Item = ToothId>,
    policy: SingletonPolicy,
) -> Vec<ToothGroup> {
    let mut ids: Vec<ToothId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut groups = Vec::new();
    for (i, &start) in ids.iter().enumerate() {
        let record_singleton = match policy {
            SingletonPolicy::Always => true,
            SingletonPolicy::Never => false,
            SingletonPolicy::Isolated => !has_decade_neighbour(&ids, i),
        };
        if record_singleton {
            groups.push(ToothGroup(vec![start]));
        }

        let mut group = vec![start];
        for &next in &ids[i + 1..] {
            if group.len() >= MAX_GROUP_SIZE || next.decade() != start.decade() {
                break;
            }
            group.push(next);
            groups.push(ToothGroup(group.clone()));
        }
    }
    groups
}

/// Sorted and deduplicated input means any same-decade tooth sits right
/// next to `ids[i]`.
fn has_decade_neighbour(ids: &[ToothId], i: usize) -> bool {
    let decade = ids[i].decade();
    let before = i.checked_sub(1).map(|j| ids[j].decade() == decade);
    let after = ids.get(i + 1).map(|t| t.decade() == decade);
    before.unwrap_or(false) || after.unwrap_or(false)
}
