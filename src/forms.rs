//! Small form conveniences: checkbox groups, submit gating, conditional
//! inputs and dependent checkboxes.
//!
//! Every function is a stateless mutation of the page and can be called any
//! number of times with the same result.

use crate::error::Result;
use crate::page::{Control, Page};

pub const TOGGLING_CLASS: &str = "toggling";
pub const SUBMIT_BUTTON_ID: &str = "create";

/// Propagate a checkbox state to every element of `class`.
pub fn toggle_checkbox_group<P: Page>(page: &P, checked: bool, class: &str) {
    for checkbox in page.by_class(class) {
        checkbox.set_checked(checked);
    }
}

/// Enable the submit button only while some `toggling` checkbox is checked.
pub fn toggle_submit_button<P: Page>(page: &P) -> Result<()> {
    let any_checked = page.by_class(TOGGLING_CLASS).iter().any(|c| c.checked());
    page.require(SUBMIT_BUTTON_ID)?.set_disabled(!any_checked);
    Ok(())
}

/// Enable `button_id` only while `input_id` has a value.
pub fn toggle_submit_button_input<P: Page>(
    page: &P,
    input_id: &str,
    button_id: &str,
) -> Result<()> {
    let empty = page.require(input_id)?.value().is_empty();
    page.require(button_id)?.set_disabled(empty);
    Ok(())
}

/// Show and require `input_id` only when the select holds `selected_option`.
pub fn toggle_input<P: Page>(
    page: &P,
    select_value: &str,
    selected_option: &str,
    input_id: &str,
) -> Result<()> {
    let input = page.require(input_id)?;
    if select_value == selected_option {
        input.set_display("block");
        input.set_required(true);
    } else {
        input.set_display("none");
        input.set_value("");
        input.set_required(false);
    }
    Ok(())
}

/// An unchecked checkbox disables and clears its related checkbox.
pub fn toggle_related_checkbox<P: Page>(page: &P, checked: bool, related_id: &str) -> Result<()> {
    let related = page.require(related_id)?;
    if checked {
        related.set_disabled(false);
    } else {
        related.set_disabled(true);
        related.set_checked(false);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::memory::MemoryPage;

    #[test]
    fn checkbox_group_follows_source() {
        let page = MemoryPage::new();
        let a = page.insert_with_class("album-1", "album");
        let b = page.insert_with_class("album-2", "album");
        let other = page.insert_with_class("single-1", "single");

        toggle_checkbox_group(&page, true, "album");
        assert!(a.checked() && b.checked());
        assert!(!other.checked());

        toggle_checkbox_group(&page, false, "album");
        assert!(!a.checked() && !b.checked());
    }

    #[test]
    fn submit_disabled_until_something_checked() {
        let page = MemoryPage::new();
        let button = page.insert(SUBMIT_BUTTON_ID);
        let first = page.insert_with_class("c1", TOGGLING_CLASS);
        page.insert_with_class("c2", TOGGLING_CLASS);

        toggle_submit_button(&page).unwrap();
        assert!(button.disabled());

        first.set_checked(true);
        toggle_submit_button(&page).unwrap();
        assert!(!button.disabled());

        first.set_checked(false);
        toggle_submit_button(&page).unwrap();
        assert!(button.disabled());
    }

    #[test]
    fn submit_without_button_is_reported() {
        let page = MemoryPage::new();
        let err = toggle_submit_button(&page).unwrap_err();
        assert!(matches!(err, Error::MissingElement(id) if id == SUBMIT_BUTTON_ID));
    }

    #[test]
    fn submit_follows_input_value() {
        let page = MemoryPage::new();
        let input = page.insert("query");
        let button = page.insert("go");

        toggle_submit_button_input(&page, "query", "go").unwrap();
        assert!(button.disabled());

        input.set_value("radiohead");
        toggle_submit_button_input(&page, "query", "go").unwrap();
        assert!(!button.disabled());
    }

    #[test]
    fn conditional_input_reveal_and_reset() {
        let page = MemoryPage::new();
        let input = page.insert("custom-name");

        toggle_input(&page, "custom", "custom", "custom-name").unwrap();
        assert_eq!(input.display(), "block");
        assert!(input.required());

        input.set_value("typed");
        toggle_input(&page, "default", "custom", "custom-name").unwrap();
        assert_eq!(input.display(), "none");
        assert_eq!(input.value(), "");
        assert!(!input.required());

        // idempotent
        toggle_input(&page, "default", "custom", "custom-name").unwrap();
        assert_eq!(input.display(), "none");
    }

    #[test]
    fn related_checkbox_is_disabled_and_cleared() {
        let page = MemoryPage::new();
        let related = page.insert("notify");
        related.set_disabled(true);

        toggle_related_checkbox(&page, true, "notify").unwrap();
        assert!(!related.disabled());
        related.set_checked(true);

        toggle_related_checkbox(&page, false, "notify").unwrap();
        assert!(related.disabled());
        assert!(!related.checked());
    }
}
