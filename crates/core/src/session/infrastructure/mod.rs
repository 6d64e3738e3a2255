pub mod event_script;
