mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod products;
pub use products::Products;

mod dashboard;
pub use dashboard::{AdminDashboard, Dashboard, SellerDashboard, SupportDashboard};
