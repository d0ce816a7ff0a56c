pub mod booking;
pub mod business;
pub mod client;
pub mod customization;
pub mod integration;
pub mod notification;
pub mod review;
pub mod service;
pub mod team;
pub mod user;

pub use booking::{Booking, BookingDetail, BookingStatus};
pub use business::{Business, BusinessStatus};
pub use client::Client;
pub use customization::ClientCustomization;
pub use integration::Integration;
pub use notification::Notification;
pub use review::Review;
pub use service::Service;
pub use team::TeamMember;
pub use user::User;
