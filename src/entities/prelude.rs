pub use super::searches::Entity as Searches;
