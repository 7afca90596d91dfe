use {
    crate::{
        config::DF,
        data::{DataVersion, Dataset},
        domain::BucketWidth,
        models::{AlivePathError, BetaGeoFitter, CustomerLifetimeSeries, ModelError},
    },
    std::{collections::HashMap, sync::Arc},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlivePathKey {
    pub customer_id: String,
    pub data_version: DataVersion,
    pub horizon: usize,
    pub bucket_width: BucketWidth,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// Memoised alive paths. Every entry belongs to one data version; seeing a key
/// with a different version drops the whole cache.
#[derive(Debug, Default)]
pub struct AlivePathCache {
    version: Option<DataVersion>,
    entries: HashMap<AlivePathKey, Arc<CustomerLifetimeSeries>>,
    stats: CacheStats,
}

impl AlivePathCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Adopt `version`, clearing every entry if it differs from the current one.
    /// Returns true when entries were dropped.
    pub fn sync_version(&mut self, version: DataVersion) -> bool {
        match self.version {
            Some(v) if v == version => false,
            previous => {
                self.version = Some(version);
                let dropped = !self.entries.is_empty();
                if previous.is_some() {
                    self.stats.invalidations += 1;
                    if DF.log_cache {
                        log::info!(
                            "Alive path cache invalidated ({} entries), data version now {}",
                            self.entries.len(),
                            version
                        );
                    }
                }
                self.entries.clear();
                dropped
            }
        }
    }

    pub fn get(&self, key: &AlivePathKey) -> Option<Arc<CustomerLifetimeSeries>> {
        self.entries.get(key).cloned()
    }

    pub fn get_or_try_insert_with<F>(
        &mut self,
        key: AlivePathKey,
        compute: F,
    ) -> Result<Arc<CustomerLifetimeSeries>, AlivePathError>
    where
        F: FnOnce() -> Result<CustomerLifetimeSeries, AlivePathError>,
    {
        self.sync_version(key.data_version);

        if let Some(hit) = self.entries.get(&key) {
            self.stats.hits += 1;
            return Ok(Arc::clone(hit));
        }

        self.stats.misses += 1;
        if DF.log_cache {
            log::info!(
                "Alive path cache miss: customer {} horizon {} ({})",
                key.customer_id,
                key.horizon,
                key.bucket_width
            );
        }
        let series = Arc::new(compute()?);
        self.entries.insert(key, Arc::clone(&series));
        Ok(series)
    }
}

/// The fitted model for one data version and penalizer.
#[derive(Debug, Default)]
pub struct ModelCache {
    key: Option<(DataVersion, u64)>,
    model: Option<Arc<BetaGeoFitter>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_fit(
        &mut self,
        dataset: &Dataset,
        penalizer_coef: f64,
    ) -> Result<Arc<BetaGeoFitter>, ModelError> {
        let key = (dataset.version, penalizer_coef.to_bits());
        if let (Some(k), Some(model)) = (self.key, &self.model) {
            if k == key {
                return Ok(Arc::clone(model));
            }
        }

        let mut model = BetaGeoFitter::new(penalizer_coef);
        model.fit_customers(&dataset.customers)?;
        let model = Arc::new(model);
        self.key = Some(key);
        self.model = Some(Arc::clone(&model));
        Ok(model)
    }
}
