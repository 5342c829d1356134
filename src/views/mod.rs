pub mod budget_view;
pub mod chat_panel;
pub mod furniture_view;
pub mod palette_view;
pub mod room_view;
