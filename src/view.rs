//! Derives the visible slice of the roster from the live search and group
//! filter inputs. Projection is a full rescan on every change; rosters are
//! classroom sized so there is nothing worth caching.

use tracing::debug;

use crate::models::{Group, Student};

/// Group filter selected next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupFilter {
    #[default]
    All,
    Only(Group),
}

impl GroupFilter {
    pub fn matches(self, group: Group) -> bool {
        match self {
            GroupFilter::All => true,
            GroupFilter::Only(wanted) => wanted == group,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupFilter::All => "All Groups",
            GroupFilter::Only(group) => group.label(),
        }
    }
}

/// Live query inputs: free-text search plus the group filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub group_filter: GroupFilter,
}

impl Query {
    pub fn new(search: impl Into<String>, group_filter: GroupFilter) -> Self {
        Self {
            search: search.into(),
            group_filter,
        }
    }

    /// Whether either input narrows the roster.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.group_filter != GroupFilter::All
    }

    pub fn push_char(&mut self, ch: char) {
        self.search.push(ch);
    }

    pub fn backspace(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Step the filter through All and every group, wrapping either way.
    pub fn cycle_group_filter(&mut self, forward: bool) {
        let count = Group::ALL.len();
        let slot = match self.group_filter {
            GroupFilter::All => 0,
            GroupFilter::Only(group) => group.index() + 1,
        };
        let next = if forward {
            (slot + 1) % (count + 1)
        } else {
            (slot + count) % (count + 1)
        };
        self.group_filter = match next.checked_sub(1) {
            Some(idx) => GroupFilter::Only(Group::ALL[idx]),
            None => GroupFilter::All,
        };
        debug!(filter = self.group_filter.label(), "group filter changed");
    }

    /// Both predicates for a single student.
    pub fn matches(&self, student: &Student) -> bool {
        self.matches_search(student) && self.group_filter.matches(student.group)
    }

    fn matches_search(&self, student: &Student) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        student.first_name.to_lowercase().contains(&needle)
            || student.last_name.to_lowercase().contains(&needle)
            || student.group.label().to_lowercase().contains(&needle)
    }
}

/// Students matching `query`, in store order.
pub fn project<'a>(students: &'a [Student], query: &Query) -> Vec<&'a Student> {
    students.iter().filter(|s| query.matches(s)).collect()
}
