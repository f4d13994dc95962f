//! 下拉菜单与移动端菜单的打开状态
//!
//! 外部点击统一调用 [`FocusState::dismiss`]。

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusState {
    pub dropdown_open: bool,
    pub mobile_menu_open: bool,
}

impl FocusState {
    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn dismiss(&mut self) {
        *self = Self::default();
    }

    pub fn any_open(&self) -> bool {
        self.dropdown_open || self.mobile_menu_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_dismiss() {
        let mut focus = FocusState::default();
        assert!(!focus.any_open());

        focus.toggle_dropdown();
        focus.toggle_mobile_menu();
        assert!(focus.dropdown_open && focus.mobile_menu_open);

        focus.toggle_dropdown();
        assert!(!focus.dropdown_open);
        assert!(focus.any_open());

        focus.dismiss();
        assert_eq!(focus, FocusState::default());
    }
}
