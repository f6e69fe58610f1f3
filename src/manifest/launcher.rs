use super::names::last_segment;
use super::{ManifestIndex, APPLICATION};
use std::collections::HashSet;
use tracing::{debug, trace};

const ACTION_MAIN: &str = "MAIN";
const CATEGORY_LAUNCHER: &str = "LAUNCHER";

impl ManifestIndex {
    /// The launcher activity: an activity that has both a `MAIN` action and a
    /// `LAUNCHER` category among its intent filters.
    ///
    /// Action and category names are matched on their last dot segment, so
    /// `android.intent.action.MAIN` and `MAIN` both count. Entries without a
    /// name are ignored. When several activities qualify, the first one in
    /// document order wins.
    pub fn launcher(&self) -> Option<String> {
        let main_activities = self.activities_with("action", ACTION_MAIN);
        let launcher_activities: HashSet<&str> = self
            .activities_with("category", CATEGORY_LAUNCHER)
            .into_iter()
            .collect();

        let launcher = main_activities
            .into_iter()
            .find(|name| launcher_activities.contains(name))
            .map(|name| self.resolve(name));

        debug!("Launcher activity: {:?}", launcher);
        launcher
    }

    /// Raw names of activities owning an intent-filter entry of `tag` whose
    /// name ends in `marker`, in document order without duplicates
    fn activities_with(&self, tag: &str, marker: &str) -> Vec<&str> {
        let path = format!("{}/activity/intent-filter/{}", APPLICATION, tag);
        let mut found: Vec<&str> = Vec::new();

        for entry in self.document().query(&path) {
            let Some(name) = self.lookup_name(entry) else {
                trace!("Skipping <{}> without a name", tag);
                continue;
            };
            if last_segment(name) != marker {
                continue;
            }

            let activity = entry
                .parent()
                .and_then(|filter| filter.parent())
                .and_then(|activity| self.lookup_name(activity));

            match activity {
                Some(activity) if !found.contains(&activity) => found.push(activity),
                Some(_) => {}
                None => trace!("Skipping <{}> {} in an unnamed activity", tag, name),
            }
        }
        found
    }
}
