pub mod reminder_dispatcher;

pub use reminder_dispatcher::ReminderDispatcher;
