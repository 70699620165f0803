//! UI Components
//!
//! Leptos components for the dashboard.

mod board_view;
mod budget_panel;
mod card_view;
mod date_range_bar;
mod day_column;
mod delete_confirm_button;
mod login_form;
mod scouting_panel;
mod side_lists;

pub use board_view::BoardView;
pub use budget_panel::BudgetPanel;
pub use card_view::CardView;
pub use date_range_bar::DateRangeBar;
pub use day_column::DayColumnView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_form::LoginForm;
pub use scouting_panel::ScoutingPanel;
pub use side_lists::{NeedsList, TodoList};
