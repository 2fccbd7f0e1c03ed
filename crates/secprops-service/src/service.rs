//! The [`SecurityPropertyService`] lifecycle.
//!
//! A service is started with an initial property set, re-applied whenever
//! the desired set changes, and stopped when the owning subsystem goes
//! away. Every change is expressed as a [`PropertyDiff`] against what the
//! service itself applied last, so properties set by someone else are never
//! touched unless they are named in the desired set.

use std::collections::HashMap;
use std::sync::Arc;

use secprops_diff::{diff_properties, PropertyMap};
use secprops_registry::{validate_property_name, PropertyRegistry};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::report::{ApplyReport, Restoration};

/// Applies security properties to a registry and undoes them on demand.
pub struct SecurityPropertyService {
    registry: Arc<dyn PropertyRegistry>,
    config: ServiceConfig,
    started: bool,
    /// Properties this service has written, with the value it wrote.
    applied: PropertyMap,
    /// Registry value each applied key had before its first write.
    originals: HashMap<String, Option<String>>,
}

impl SecurityPropertyService {
    /// Create a stopped service over `registry`.
    pub fn new(registry: Arc<dyn PropertyRegistry>, config: ServiceConfig) -> Self {
        Self {
            registry,
            config,
            started: false,
            applied: PropertyMap::new(),
            originals: HashMap::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The property set this service currently has applied.
    pub fn applied(&self) -> &PropertyMap {
        &self.applied
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Start the service and apply `initial`.
    pub fn start(&mut self, initial: &PropertyMap) -> ServiceResult<ApplyReport> {
        if self.started {
            return Err(ServiceError::AlreadyStarted);
        }
        validate_all(initial)?;

        self.started = true;
        match self.apply(initial) {
            Ok(report) => {
                info!(count = self.applied.len(), "security property service started");
                Ok(report)
            }
            Err(e) => {
                self.rollback();
                Err(e)
            }
        }
    }

    /// Make the registry reflect `desired`.
    ///
    /// Names are validated up front; an invalid name fails the whole call
    /// before anything is written.
    pub fn apply(&mut self, desired: &PropertyMap) -> ServiceResult<ApplyReport> {
        self.ensure_started()?;
        validate_all(desired)?;

        let diff = diff_properties(desired, &self.applied);
        let mut report = ApplyReport::new(diff);
        if report.is_noop() {
            debug!("desired properties already applied");
            return Ok(report);
        }

        for (name, value) in report.diff.added.iter().chain(&report.diff.updated) {
            self.write(name, value)?;
        }

        let removed: Vec<String> = report.diff.removed.keys().cloned().collect();
        for name in removed {
            if let Some(restoration) = self.restore(&name)? {
                report.record(&name, restoration);
            }
        }

        info!(
            added = report.diff.additions(),
            updated = report.diff.updates(),
            removed = report.diff.removals(),
            "security properties applied"
        );
        Ok(report)
    }

    /// Set a single property.
    pub fn set_property(&mut self, name: &str, value: &str) -> ServiceResult<()> {
        self.ensure_started()?;
        validate_property_name(name)?;
        self.write(name, value)
    }

    /// Stop managing a single property.
    ///
    /// Returns `Ok(None)` if the service never applied `name`.
    pub fn remove_property(&mut self, name: &str) -> ServiceResult<Option<Restoration>> {
        self.ensure_started()?;
        self.restore(name)
    }

    /// Stop the service.
    ///
    /// With `restore_on_stop` every applied property is restored; otherwise
    /// the registry is left as it is and the service simply forgets what it
    /// wrote.
    pub fn stop(&mut self) -> ServiceResult<ApplyReport> {
        self.ensure_started()?;

        let report = if self.config.restore_on_stop {
            self.apply(&PropertyMap::new())?
        } else {
            self.applied.clear();
            self.originals.clear();
            ApplyReport::new(Default::default())
        };

        self.started = false;
        info!(
            restored = report.restored.len(),
            cleared = report.cleared.len(),
            "security property service stopped"
        );
        Ok(report)
    }

    fn ensure_started(&self) -> ServiceResult<()> {
        if self.started {
            Ok(())
        } else {
            Err(ServiceError::NotStarted)
        }
    }

    /// Undo a failed start: put back everything written so far and return
    /// to the stopped state. Restore failures are logged, not returned.
    fn rollback(&mut self) {
        let names: Vec<String> = self.applied.keys().cloned().collect();
        for name in names {
            if let Err(e) = self.restore(&name) {
                warn!(
                    name = %name,
                    error = %e,
                    "failed to restore security property during rollback"
                );
            }
        }
        self.applied.clear();
        self.originals.clear();
        self.started = false;
        warn!("security property service failed to start; changes rolled back");
    }

    fn write(&mut self, name: &str, value: &str) -> ServiceResult<()> {
        let original = if self.originals.contains_key(name) {
            None
        } else {
            Some(self.registry.get(name)?)
        };
        self.registry.set(name, value)?;
        if let Some(original) = original {
            self.originals.insert(name.to_string(), original);
        }
        self.applied.insert(name.to_string(), value.to_string());
        debug!(name, "security property set");
        Ok(())
    }

    fn restore(&mut self, name: &str) -> ServiceResult<Option<Restoration>> {
        if !self.applied.contains_key(name) {
            warn!(name, "security property not managed by this service; ignoring removal");
            return Ok(None);
        }

        let restoration = match self.originals.get(name).cloned().flatten() {
            Some(original) => {
                self.registry.set(name, &original)?;
                Restoration::Restored { original }
            }
            None => {
                self.registry.clear(name)?;
                Restoration::Cleared
            }
        };

        self.applied.remove(name);
        self.originals.remove(name);
        debug!(name, ?restoration, "security property removed");
        Ok(Some(restoration))
    }
}

fn validate_all(properties: &PropertyMap) -> ServiceResult<()> {
    for name in properties.keys() {
        validate_property_name(name)?;
    }
    Ok(())
}
