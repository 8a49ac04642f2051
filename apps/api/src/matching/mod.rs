pub mod alignment;
pub mod bucketizer;
pub mod handlers;
pub mod profile;
pub mod ranker;
pub mod recommender;
pub mod similarity;
pub mod store;
pub mod vectorizer;
