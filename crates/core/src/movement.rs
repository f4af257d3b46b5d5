//! Next-step selection for the player and for enemies.
//! This module exists so movement choices stay pure functions of board, actor, and RNG.
//! It does not move anything or check occupancy; the orchestrator validates every choice.

use std::collections::{BTreeMap, VecDeque, btree_map::Entry};

use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::entities::Actor;
use crate::rng::random_index;
use crate::types::{Pos, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRole {
    Player,
    Enemy { player: Pos, aggro_radius: u32 },
}

/// Picks the actor's next cell: its own cell or a walkable orthogonal neighbour.
pub fn select_next_move(actor: &Actor, board: &Board, role: MoveRole, rng: &mut ChaCha8Rng) -> Pos {
    match role {
        MoveRole::Player => player_move(actor, board, rng),
        MoveRole::Enemy { player, aggro_radius } => {
            if actor.pos().manhattan(player) <= aggro_radius {
                chase_move(actor, board, player, rng)
            } else {
                wander_move(actor, board, rng)
            }
        }
    }
}

fn player_move(actor: &Actor, board: &Board, rng: &mut ChaCha8Rng) -> Pos {
    let start = actor.pos();
    let search = KnownFloorSearch::run(board, start);

    if let Some(exit) = board.exit_pos()
        && board.visibility(exit) != Visibility::Unseen
        && let Some(step) = search.first_step_to(exit)
    {
        return step;
    }

    if let Some(step) = search.step_towards_frontier(board, actor) {
        return step;
    }

    wander_move(actor, board, rng)
}

/// Greedy approach: the candidate closest to the player, with recently visited cells costing
/// one extra step. Ties are broken at random.
fn chase_move(actor: &Actor, board: &Board, player: Pos, rng: &mut ChaCha8Rng) -> Pos {
    let here = actor.pos();
    let score = |pos: Pos| pos.manhattan(player) + u32::from(actor.visited_recently(pos));

    let mut best_score = score(here);
    let mut best = vec![here];
    for next in here.neighbors() {
        if !board.is_walkable(next) {
            continue;
        }
        let candidate = score(next);
        if candidate < best_score {
            best_score = candidate;
            best.clear();
            best.push(next);
        } else if candidate == best_score {
            best.push(next);
        }
    }
    best[random_index(rng, best.len())]
}

fn wander_move(actor: &Actor, board: &Board, rng: &mut ChaCha8Rng) -> Pos {
    let here = actor.pos();
    let open: Vec<Pos> = here.neighbors().into_iter().filter(|&pos| board.is_walkable(pos)).collect();
    let fresh: Vec<Pos> = open.iter().copied().filter(|&pos| !actor.visited_recently(pos)).collect();

    if !fresh.is_empty() {
        return fresh[random_index(rng, fresh.len())];
    }
    if !open.is_empty() {
        return open[random_index(rng, open.len())];
    }
    here
}

fn is_known_floor(board: &Board, pos: Pos) -> bool {
    board.is_walkable(pos) && board.visibility(pos) != Visibility::Unseen
}

fn is_frontier(board: &Board, pos: Pos) -> bool {
    is_known_floor(board, pos)
        && pos
            .neighbors()
            .into_iter()
            .any(|next| board.in_bounds(next) && board.visibility(next) == Visibility::Unseen)
}

/// Breadth-first search over known floor that remembers, for every reached cell, its distance
/// and the first step taken from the start to reach it.
struct KnownFloorSearch {
    start: Pos,
    order: Vec<Pos>,
    reached: BTreeMap<Pos, (u32, Pos)>,
}

impl KnownFloorSearch {
    fn run(board: &Board, start: Pos) -> Self {
        let mut reached = BTreeMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        reached.insert(start, (0_u32, start));
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            order.push(current);
            let Some(&(dist, first)) = reached.get(&current) else {
                continue;
            };
            for neighbor in current.neighbors() {
                if !is_known_floor(board, neighbor) {
                    continue;
                }
                if let Entry::Vacant(entry) = reached.entry(neighbor) {
                    let first_step = if current == start { neighbor } else { first };
                    entry.insert((dist + 1, first_step));
                    queue.push_back(neighbor);
                }
            }
        }

        Self { start, order, reached }
    }

    fn first_step_to(&self, target: Pos) -> Option<Pos> {
        if target == self.start {
            return None;
        }
        self.reached.get(&target).map(|&(_, first)| first)
    }

    /// First step towards the nearest frontier, preferring steps off the recent trail among
    /// equally near frontiers.
    fn step_towards_frontier(&self, board: &Board, actor: &Actor) -> Option<Pos> {
        let mut nearest: Option<u32> = None;
        let mut steps = Vec::new();
        for &pos in &self.order {
            if pos == self.start || !is_frontier(board, pos) {
                continue;
            }
            let Some(&(dist, first)) = self.reached.get(&pos) else {
                continue;
            };
            match nearest {
                Some(best) if dist > best => break,
                _ => {
                    nearest = Some(dist);
                    steps.push(first);
                }
            }
        }

        steps
            .iter()
            .copied()
            .find(|&step| !actor.visited_recently(step))
            .or_else(|| steps.first().copied())
    }
}
