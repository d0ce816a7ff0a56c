pub mod admin;
pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod clients;
pub mod customization;
pub mod health;
pub mod integrations;
pub mod notifications;
pub mod public;
pub mod reviews;
pub mod services;
pub mod team;
