// Planning layer: recommendations, trips and session state

pub mod recommender;
pub mod session;
pub mod trip;

pub use self::recommender::{
    Recommendation, RecommendationConfig, RecommendationSet, Recommender, Variant,
};
pub use self::session::{SessionId, SessionStore};
pub use self::trip::{
    requests_from_basket, ItemRequest, StepAction, TripConfig, TripPlan, TripPlanner, TripStep,
};
