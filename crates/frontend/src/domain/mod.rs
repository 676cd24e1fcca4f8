pub mod a002_recipient;
