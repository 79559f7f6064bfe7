pub mod health;
pub mod pages;
pub mod pageview;
pub mod stats;
pub mod waitlist;
