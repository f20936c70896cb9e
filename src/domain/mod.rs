pub mod errors;
pub mod geo;
pub mod recycler;
pub mod user;

pub use errors::{DomainError, DUPLICATE_EMAIL_MESSAGE};
pub use geo::{haversine_km, round_distance_km, BoundingBox, GeoPoint, NearbyMatch};
pub use recycler::{parse_accepted_items, NewRecycler, Recycler};
pub use user::{NewUser, User};
