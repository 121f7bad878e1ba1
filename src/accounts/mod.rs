mod account;
mod register;
mod store;

pub use account::{Account, AccountClass, Admin, AdminAccount, User, UserAccount};
pub use register::RegisterForm;
pub use store::AccountStore;
