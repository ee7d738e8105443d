pub mod db;
pub mod secret;
