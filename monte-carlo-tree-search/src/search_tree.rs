use antidote::Mutex;
use game_tree::{GameTreeNode, NodeState};
use log::{debug, trace};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::Hasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::node_metadata::NodeMetadata;
use crate::{ConfigError, FinalSelection, SearchConfig};

type MetadataMap = HashMap<u64, Arc<NodeMetadata>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Iterations that made it all the way through backpropagation.
    pub iterations: u64,
    pub elapsed: Duration,
}

/// Search statistics keyed by the hash of each game state. Clones share the
/// same statistics.
#[derive(Clone)]
pub struct SearchTree {
    node_metadata: Arc<Mutex<MetadataMap>>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self {
            node_metadata: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Explore more of the SearchTree from the node provided
    /// with the given search configuration.
    pub fn search<N: GameTreeNode<Node = N>>(
        &self,
        node: N,
        config: &SearchConfig,
    ) -> Result<SearchSummary, ConfigError> {
        config.validate()?;

        let start = Instant::now();
        let reserved_iterations = Arc::new(AtomicU64::new(0));
        let completed_iterations = Arc::new(AtomicU64::new(0));
        let mut handles = vec![];
        for worker in 0..config.threads {
            let node = node.clone();
            let rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(worker as u64)),
                None => StdRng::from_entropy(),
            };
            let task = SearchTask {
                tree: self.clone(),
                reserved_iterations: Arc::clone(&reserved_iterations),
                completed_iterations: Arc::clone(&completed_iterations),
                config: config.clone(),
                rng,
            };
            handles.push(thread::spawn(move || task.run(node)));
        }

        for h in handles {
            h.join().expect("no panics");
        }

        let summary = SearchSummary {
            iterations: completed_iterations.load(Ordering::SeqCst),
            elapsed: start.elapsed(),
        };
        debug!(
            "searched {} iterations in {:?} on {} threads, {} nodes known",
            summary.iterations,
            summary.elapsed,
            config.threads,
            self.len()
        );
        Ok(summary)
    }

    /// Searches from `root` and picks the child to play. `None` when the game
    /// at `root` is already finished.
    pub fn think<N: GameTreeNode<Node = N>>(
        &self,
        root: &N,
        config: &SearchConfig,
    ) -> Result<Option<N>, ConfigError> {
        let children = match root.calculate_state() {
            NodeState::Finished(_) => return Ok(None),
            NodeState::HasChildren(children) => children,
        };

        self.search(root.clone(), config)?;
        Ok(self.best_child(&children, config.final_selection).cloned())
    }

    /// The best of `children` according to the statistics gathered so far.
    /// Only visited children are considered, ties go to the earliest child.
    pub fn best_child<'a, N: GameTreeNode>(
        &self,
        children: &'a [N],
        selection: FinalSelection,
    ) -> Option<&'a N> {
        let node_metadata = self.node_metadata.lock();

        let mut best: Option<(&N, OrderedFloat<f64>)> = None;
        for child in children {
            let meta = match node_metadata.get(&hash(child)) {
                Some(meta) if meta.is_visited() => meta,
                _ => continue,
            };

            let value = match selection {
                FinalSelection::WinRate => meta.win_rate().unwrap_or(0.0),
                FinalSelection::MostVisits => f64::from(meta.number_of_visits()),
            };
            let value = OrderedFloat(value);

            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((child, value));
            }
        }

        if let Some((child, value)) = best {
            trace!("best child scored {} by {:?}", value.into_inner(), selection);
            return Some(child);
        }
        None
    }

    pub fn metadata(&self, node: &impl GameTreeNode) -> Option<Arc<NodeMetadata>> {
        self.node_metadata.lock().get(&hash(node)).cloned()
    }

    /// Number of game states with statistics.
    pub fn len(&self) -> usize {
        self.node_metadata.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.node_metadata.lock().clear();
    }

    /// Counts the states reachable from `node` through fully expanded states,
    /// `node` included when it is fully expanded itself.
    pub fn number_of_fully_expanded_nodes<N: GameTreeNode<Node = N>>(&self, node: N) -> u64 {
        let node_metadata = self.node_metadata.lock();

        let mut count = 0;
        let mut seen = HashSet::new();
        let mut queue = vec![node];
        while let Some(n) = queue.pop() {
            let key = hash(&n);
            if !seen.insert(key) {
                continue;
            }

            match node_metadata.get(&key) {
                Some(meta) if meta.is_fully_expanded() => {}
                _ => continue,
            }

            count += 1;
            queue.extend(n.children());
        }
        count
    }
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

struct SearchTask {
    tree: SearchTree,
    reserved_iterations: Arc<AtomicU64>,
    completed_iterations: Arc<AtomicU64>,
    config: SearchConfig,
    rng: StdRng,
}

impl SearchTask {
    fn run<N: GameTreeNode<Node = N>>(mut self, node: N) {
        let start = Instant::now();

        let mut local_node_metadata = HashMap::new();
        macro_rules! load_metadata {
            ($node:expr) => {
                Self::load_metadata($node, &mut local_node_metadata, &self.tree.node_metadata)
            };
        }

        struct Current<N> {
            node: N,
            metadata: Arc<NodeMetadata>,
        }

        'run: loop {
            let reserved = self.reserved_iterations.fetch_add(1, Ordering::SeqCst);
            if reserved >= self.config.max_iterations {
                break 'run;
            }

            let mut visited = vec![];
            let mut current = Current {
                node: node.clone(),
                metadata: load_metadata!(&node),
            };

            let outcome = loop {
                if start.elapsed() > self.config.max_duration {
                    break 'run;
                }

                let mut children = match current.node.calculate_state() {
                    NodeState::Finished(outcome) => {
                        visited.push(current);
                        break outcome;
                    }
                    NodeState::HasChildren(children) => children
                        .into_iter()
                        .map(|c| {
                            let metadata = load_metadata!(&c);
                            (c, metadata)
                        })
                        .collect::<Vec<_>>(),
                };

                debug_assert!(!children.is_empty());

                if !current.metadata.is_fully_expanded() {
                    let non_visited_indices = children
                        .iter()
                        .enumerate()
                        .filter_map(|(i, (_, meta))| {
                            if meta.is_visited() {
                                return None;
                            }

                            Some(i)
                        })
                        .collect::<Vec<_>>();

                    // Expand one unvisited child and simulate from it.
                    if let Some(&index) = non_visited_indices.choose(&mut self.rng) {
                        let (child, metadata) = children.swap_remove(index);
                        let outcome = self.config.rollout.play_out(child.clone(), &mut self.rng);

                        visited.push(current);
                        visited.push(Current {
                            node: child,
                            metadata,
                        });
                        break outcome;
                    }

                    current.metadata.set_fully_expanded();
                }

                let parent_number_of_visits = current.metadata.number_of_visits();
                let exploration_factor = self.config.exploration_factor;
                let (child, metadata) = children
                    .into_iter()
                    .max_by_key(|(_, meta)| {
                        OrderedFloat(meta.uct(parent_number_of_visits, exploration_factor))
                    })
                    .expect("array is not empty");

                visited.push(current);
                current = Current {
                    node: child,
                    metadata,
                };
            };

            // Every state on the path is credited from the perspective of the
            // player who moved into it.
            let depth = visited.len();
            for Current { node, metadata } in visited {
                metadata.record_result(outcome, node.current_player().next());
            }

            let completed = self.completed_iterations.fetch_add(1, Ordering::SeqCst) + 1;
            trace!(
                "iteration {} reached depth {} with {:?}",
                completed,
                depth,
                outcome
            );
        }
    }

    fn load_metadata(
        node: &impl GameTreeNode,
        local: &mut MetadataMap,
        synchronized: &Arc<Mutex<MetadataMap>>,
    ) -> Arc<NodeMetadata> {
        let hash = hash(node);
        if let Some(metadata) = local.get(&hash) {
            return Arc::clone(metadata);
        }

        let metadata = synchronized
            .lock()
            .entry(hash)
            .or_insert_with(|| Arc::new(NodeMetadata::new()))
            .clone();
        local.insert(hash, Arc::clone(&metadata));
        metadata
    }
}

fn hash(node: &impl GameTreeNode) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}
