//! Clusters as lists of point identifiers, and a clustering as a list of clusters.
//!
//! A cluster flagged as noise, or with less than 2 points, is degenerate: it has no density
//! sparseness and is skipped by the evaluation (it still counts in the relation size).

use indexmap::{IndexMap, IndexSet};

use crate::relation::DataId;

/// A cluster: an ordered set of point ids and a noise flag.
#[derive(Clone, Debug)]
pub struct Cluster {
    name: Option<String>,
    /// ids in insertion order, without repetition
    ids: Vec<DataId>,
    noise: bool,
}

impl Cluster {
    /// a regular cluster. Repeated ids are kept once.
    pub fn new(ids: Vec<DataId>) -> Self {
        Cluster {
            name: None,
            ids: dedup(ids),
            noise: false,
        }
    }

    /// a cluster of noise points
    pub fn noise(ids: Vec<DataId>) -> Self {
        Cluster {
            name: None,
            ids: dedup(ids),
            noise: true,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(String::from(name));
        self
    }

    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn get_ids(&self) -> &[DataId] {
        &self.ids
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_noise(&self) -> bool {
        self.noise
    }

    /// noise or singletons: no sparseness can be defined
    pub fn is_degenerate(&self) -> bool {
        self.noise || self.ids.len() < 2
    }
} // end of impl Cluster

fn dedup(ids: Vec<DataId>) -> Vec<DataId> {
    let nb_ids = ids.len();
    let set: IndexSet<DataId> = ids.into_iter().collect();
    if set.len() < nb_ids {
        log::warn!("cluster had {} repeated ids", nb_ids - set.len());
    }
    set.into_iter().collect()
}

/// A list of clusters over a relation.
#[derive(Clone, Debug, Default)]
pub struct Clustering {
    clusters: Vec<Cluster>,
}

impl Clustering {
    pub fn new(clusters: Vec<Cluster>) -> Self {
        Clustering { clusters }
    }

    /// Builds a clustering from one label per point, point i having id i.
    /// Clusters are in order of first appearance of their label, negative labels go to
    /// a single noise cluster, appended last.
    pub fn from_labels(labels: &[i64]) -> Self {
        let mut groups = IndexMap::<i64, Vec<DataId>>::new();
        let mut noise = Vec::<DataId>::new();
        for (id, &label) in labels.iter().enumerate() {
            if label < 0 {
                noise.push(id);
            } else {
                groups.entry(label).or_default().push(id);
            }
        }
        let mut clusters: Vec<Cluster> = groups
            .into_iter()
            .map(|(label, ids)| Cluster::new(ids).with_name(&label.to_string()))
            .collect();
        if !noise.is_empty() {
            clusters.push(Cluster::noise(noise).with_name("noise"));
        }
        log::debug!("Clustering::from_labels nb labels : {}, nb clusters : {}", labels.len(), clusters.len());
        Clustering { clusters }
    } // end of from_labels

    pub fn get_clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn get_nb_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn push(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }
} // end of impl Clustering
