mod communication;

pub use communication::Communication;
