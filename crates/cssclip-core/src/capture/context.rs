//! Per-call capture state: visited URLs, name allocation and the task list.

use std::collections::HashMap;

use crate::asset::{build_asset_task, stylesheet_task, NameAllocator};
use crate::scan::RefKind;
use crate::task::Task;

use super::CaptureParams;

/// Name and task slot assigned to one captured URL.
struct Assigned {
    name: String,
    slot: usize,
    stylesheet: bool,
}

/// State owned by exactly one top-level `capture_text`/`capture_link` call.
///
/// Maps every captured absolute URL (fragment removed) to its assigned name.
/// An entry is made before the resource is fetched, so a cyclic import finds
/// its target here instead of recursing again.
pub(super) struct CaptureContext<'p> {
    pub(super) params: &'p CaptureParams,
    assigned: HashMap<String, Assigned>,
    names: NameAllocator,
    tasks: Vec<Task>,
}

impl<'p> CaptureContext<'p> {
    pub(super) fn new(params: &'p CaptureParams) -> Self {
        Self {
            params,
            assigned: HashMap::new(),
            names: NameAllocator::new(&params.clip_id),
            tasks: Vec::new(),
        }
    }

    /// Name of `url` if it is already captured as a stylesheet in this call.
    pub(super) fn stylesheet_name(&self, url: &str) -> Option<&str> {
        self.assigned
            .get(url)
            .filter(|a| a.stylesheet)
            .map(|a| a.name.as_str())
    }

    /// Marks `url` visited and reserves its stylesheet task slot.
    /// Returns the assigned name and the slot index.
    ///
    /// A URL first seen as a font or image keeps its name and task; the task
    /// is turned into a stylesheet task so its body gets rewritten too.
    pub(super) fn assign_stylesheet(&mut self, url: &str) -> (String, usize) {
        if let Some(entry) = self.assigned.get_mut(url) {
            entry.stylesheet = true;
            if let Some(task) = self.tasks.get_mut(entry.slot) {
                task.mime_type = "text/css".to_string();
                task.text = Some(String::new());
            }
            return (entry.name.clone(), entry.slot);
        }
        let task = stylesheet_task(url, &mut self.names, &self.params.storage);
        self.insert(url, task, true)
    }

    /// Stores the rewritten body of the stylesheet in `slot`.
    pub(super) fn fill_stylesheet(&mut self, slot: usize, body: String) {
        if let Some(task) = self.tasks.get_mut(slot) {
            task.text = Some(body);
        }
    }

    /// Name for a font or image reference, or `None` when its kind is not captured.
    pub(super) fn capture_asset(&mut self, url: &str, kind: RefKind) -> Option<String> {
        if let Some(entry) = self.assigned.get(url) {
            return Some(entry.name.clone());
        }
        let task = build_asset_task(
            url,
            kind,
            &self.params.config,
            &mut self.names,
            &self.params.storage,
        )?;
        let (name, _) = self.insert(url, task, false);
        tracing::debug!(url, name = %name, kind = kind.as_str(), "asset captured");
        Some(name)
    }

    fn insert(&mut self, url: &str, task: Task, stylesheet: bool) -> (String, usize) {
        let name = task.name().to_string();
        let slot = self.tasks.len();
        self.tasks.push(task);
        self.assigned.insert(
            url.to_string(),
            Assigned {
                name: name.clone(),
                slot,
                stylesheet,
            },
        );
        (name, slot)
    }

    pub(super) fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
