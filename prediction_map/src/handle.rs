use std::sync::{Arc, OnceLock};

use abstutil::Timer;

use crate::{MapConfig, MapError, PredictionMap, RoadNetwork};

type Loader = Box<dyn Fn(&MapConfig, &mut Timer) -> anyhow::Result<RoadNetwork> + Send + Sync>;

/// Loads the road network the first time anything asks for it. Exactly one load ever happens, no
/// matter how many threads race to be first; the rest wait for it. If the load fails, every
/// caller gets the same error from then on.
pub struct MapHandle {
    config: MapConfig,
    loader: Loader,
    map: OnceLock<Result<PredictionMap, MapError>>,
}

impl MapHandle {
    /// Loads `config.map_file` when first needed.
    pub fn new(config: MapConfig) -> MapHandle {
        MapHandle::with_loader(config, |config, timer| {
            RoadNetwork::load(&config.map_file, timer)
        })
    }

    /// Builds the network some other way, like from a map already in memory.
    pub fn with_loader<F>(config: MapConfig, loader: F) -> MapHandle
    where
        F: Fn(&MapConfig, &mut Timer) -> anyhow::Result<RoadNetwork> + Send + Sync + 'static,
    {
        MapHandle {
            config,
            loader: Box::new(loader),
            map: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// True once a load has finished, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.map.get().is_some()
    }

    pub fn get(&self) -> Result<&PredictionMap, MapError> {
        self.map.get_or_init(|| self.load()).as_ref().map_err(|err| err.clone())
    }

    fn load(&self) -> Result<PredictionMap, MapError> {
        let mut timer = Timer::new(format!("load road network from {}", self.config.map_file));
        let result = (self.loader)(&self.config, &mut timer);
        timer.done();
        match result {
            Ok(network) => Ok(PredictionMap::new(Arc::new(network), self.config.clone())),
            Err(err) => {
                let err = MapError::init(err);
                error!("{}", err);
                Err(err)
            }
        }
    }
}
