/// Open/closed state of the matching dropdowns on screen.
///
/// At most one dropdown is open at a time: opening one closes the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropdownGroup {
    open: Option<usize>,
}

impl DropdownGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open dropdown `index`, or close it if it is already open.
    pub fn toggle(&mut self, index: usize) {
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    #[must_use]
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_closes_the_other() {
        let mut group = DropdownGroup::new();
        group.toggle(0);
        assert!(group.is_open(0));

        group.toggle(2);
        assert!(group.is_open(2));
        assert!(!group.is_open(0));
        assert_eq!(group.open_index(), Some(2));
    }

    #[test]
    fn toggle_twice_closes() {
        let mut group = DropdownGroup::new();
        group.toggle(1);
        group.toggle(1);
        assert_eq!(group.open_index(), None);
    }

    #[test]
    fn close_all_clears() {
        let mut group = DropdownGroup::new();
        group.toggle(3);
        group.close_all();
        assert_eq!(group.open_index(), None);
    }
}
