pub mod article_repos;
pub mod time;

pub use article_repos::InMemoryArticleRepository;
pub use time::FixedClock;
