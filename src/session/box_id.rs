/// Identifies one of the two text boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxId {
    Top,
    Bottom,
    /// No box is active or focused.
    #[default]
    None,
}

impl BoxId {
    /// The box that receives a translation of this one.
    pub fn other(self) -> BoxId {
        match self {
            BoxId::Top => BoxId::Bottom,
            BoxId::Bottom => BoxId::Top,
            BoxId::None => BoxId::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == BoxId::None
    }
}

/// Remembers the box whose text view last had keyboard focus.
///
/// Focus moving anywhere else (a menu item, a header button) keeps the last
/// box, so edit actions triggered from there still have a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxFocus {
    last: BoxId,
}

impl Default for BoxFocus {
    fn default() -> Self {
        Self { last: BoxId::Top }
    }
}

impl BoxFocus {
    pub fn focused(&self) -> BoxId {
        self.last
    }

    pub fn focus_in(&mut self, id: BoxId) {
        if !id.is_none() {
            self.last = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other() {
        assert_eq!(BoxId::Top.other(), BoxId::Bottom);
        assert_eq!(BoxId::Bottom.other(), BoxId::Top);
        assert_eq!(BoxId::None.other(), BoxId::None);
    }

    #[test]
    fn test_focus_starts_on_top() {
        assert_eq!(BoxFocus::default().focused(), BoxId::Top);
    }

    #[test]
    fn test_focus_survives_leaving_for_another_widget() {
        let mut focus = BoxFocus::default();

        focus.focus_in(BoxId::Bottom);
        // Opening the menu or clicking Save moves focus off both boxes;
        // nothing is recorded for that.
        assert_eq!(focus.focused(), BoxId::Bottom);

        focus.focus_in(BoxId::Top);
        assert_eq!(focus.focused(), BoxId::Top);

        focus.focus_in(BoxId::None);
        assert_eq!(focus.focused(), BoxId::Top);
    }
}
