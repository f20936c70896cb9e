use crate::api::dtos::{RecyclerResponse, UserResponse};
use crate::domain::{round_distance_km, NearbyMatch, Recycler, User};

pub fn map_user_response(user: &User) -> UserResponse {
    UserResponse {
        user_id: user.id,
        user_name: user.user_name.clone(),
        email: user.email.clone(),
        phone_number: user.phone_number.clone(),
        address_text: user.address_text.clone(),
        loyalty_points: user.loyalty_points,
        is_verified: user.is_verified,
        is_premium: user.is_premium,
        created_at: user.created_at,
    }
}

pub fn map_recycler_response(recycler: Recycler) -> RecyclerResponse {
    RecyclerResponse {
        recycler_id: recycler.id,
        name: recycler.name,
        address: recycler.address,
        phone_number: recycler.phone_number,
        email: recycler.email,
        latitude: recycler.latitude,
        longitude: recycler.longitude,
        rating: recycler.rating,
        accepted_items: recycler.accepted_items,
        open_hours: recycler.open_hours,
        is_verified: recycler.is_verified,
        description: recycler.description,
        distance: None,
    }
}

pub fn map_nearby_response(nearby: NearbyMatch<Recycler>) -> RecyclerResponse {
    RecyclerResponse {
        distance: Some(round_distance_km(nearby.distance_km)),
        ..map_recycler_response(nearby.item)
    }
}
