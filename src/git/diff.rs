use super::GitRepo;
use crate::error::Result;
use gix::object::tree::diff::ChangeDetached;
use gix::ObjectId;
use similar::{ChangeTag, TextDiff};

/// Files touched and lines added/removed by one commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    pub files_changed: u32,
    pub insertions: u64,
    pub deletions: u64,
}

impl ChangeCounts {
    fn record(&mut self, insertions: u64, deletions: u64) {
        self.files_changed += 1;
        self.insertions += insertions;
        self.deletions += deletions;
    }
}

impl GitRepo {
    /// Diff `commit_id` against its first parent, or the empty tree for a root commit.
    pub(super) fn change_counts(
        &self,
        commit_id: ObjectId,
        parent_id: Option<ObjectId>,
    ) -> Result<ChangeCounts> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;

        let changes: Vec<ChangeDetached> = match parent_id {
            Some(parent_id) => {
                let parent_tree = self.repo.find_commit(parent_id)?.tree()?;
                self.repo
                    .diff_tree_to_tree(Some(&parent_tree), Some(&commit_tree), None)?
            }
            None => self.repo.diff_tree_to_tree(None, Some(&commit_tree), None)?,
        };

        let mut counts = ChangeCounts::default();
        for change in changes {
            self.handle_change(change, &mut counts);
        }
        Ok(counts)
    }

    fn handle_change(&self, change: ChangeDetached, counts: &mut ChangeCounts) {
        match change {
            ChangeDetached::Addition { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return;
                }
                if let Some(data) = self.blob_data(id) {
                    counts.record(count_lines(&data), 0);
                }
            }
            ChangeDetached::Deletion { id, entry_mode, .. } => {
                if entry_mode.is_tree() {
                    return;
                }
                if let Some(data) = self.blob_data(id) {
                    counts.record(0, count_lines(&data));
                }
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return;
                }
                if let (Some(old), Some(new)) = (self.blob_data(previous_id), self.blob_data(id)) {
                    let (added, deleted) = line_diff(&old, &new);
                    counts.record(added, deleted);
                }
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                entry_mode,
                ..
            } => {
                if entry_mode.is_tree() {
                    return;
                }
                if let (Some(old), Some(new)) = (self.blob_data(source_id), self.blob_data(id)) {
                    let (added, deleted) = line_diff(&old, &new);
                    counts.record(added, deleted);
                }
            }
        }
    }

    /// Blob contents, or `None` for objects that cannot be loaded (submodule links).
    fn blob_data(&self, id: ObjectId) -> Option<Vec<u8>> {
        self.repo.find_object(id).ok().map(|obj| obj.data.clone())
    }
}

fn is_binary(data: &[u8]) -> bool {
    data.iter().take(8192).any(|&b| b == 0)
}

fn count_lines(data: &[u8]) -> u64 {
    if is_binary(data) {
        return 0;
    }
    String::from_utf8_lossy(data).lines().count() as u64
}

fn line_diff(old: &[u8], new: &[u8]) -> (u64, u64) {
    if is_binary(old) || is_binary(new) {
        return (0, 0);
    }
    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);

    let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());
    let mut added = 0u64;
    let mut deleted = 0u64;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }
    (added, deleted)
}
