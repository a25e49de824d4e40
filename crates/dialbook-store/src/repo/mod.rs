pub mod search_history;

pub use search_history::SearchHistoryRepo;
