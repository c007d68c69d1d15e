//! Collection names shared by the cells.

pub const USERS: &str = "userList";
pub const DOCTORS: &str = "doctorList";
pub const BOOKINGS: &str = "bookingList";
pub const PAYMENTS: &str = "payment";
pub const SERVICES: &str = "serviceCollection";
