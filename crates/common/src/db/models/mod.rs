//! SeaORM entity models
//!
//! Database entities for the Movies API

mod movie;
mod rating;

pub use movie::{
    Entity as MovieEntity,
    Model as Movie,
    ActiveModel as MovieActiveModel,
    Column as MovieColumn,
};

pub use rating::{
    Entity as RatingEntity,
    Model as MovieRating,
    ActiveModel as RatingActiveModel,
    Column as RatingColumn,
    is_valid_rating,
    MAX_RATING,
    MIN_RATING,
};
