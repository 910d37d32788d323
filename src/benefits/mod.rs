mod cache;

pub use cache::{
    BenefitsCache, BenefitsError, BenefitsSource, CACHE_TTL_HOURS, CachedBenefits, load_table,
};
