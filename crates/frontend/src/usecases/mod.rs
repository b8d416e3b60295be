pub mod push_notification;
