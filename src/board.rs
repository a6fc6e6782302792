//! Board state: stone groups, liberties, captures, and position hashing.
//!
//! Stones are tracked as groups (maximal chains of same-colored stones
//! sharing liberties) held in a slot arena. Each occupied cell stores the
//! handle of its group, so a "same group" test is a handle comparison and a
//! merge only repoints cells. The 64-bit Zobrist hash is maintained
//! incrementally on every placement and removal.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::BoardError;
use crate::player::Player;
use crate::point::{COLS, Point};
use crate::zobrist;

/// Handle of a group slot. Stale handles never escape a single placement:
/// captures and merges clear every cell that pointed at a freed slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct GroupId(u32);

/// A maximal chain of same-colored stones and its liberties.
#[derive(Clone, Debug)]
pub struct StoneGroup {
    color: Player,
    stones: BTreeSet<Point>,
    liberties: BTreeSet<Point>,
}

impl StoneGroup {
    fn new(color: Player, stones: BTreeSet<Point>, liberties: BTreeSet<Point>) -> StoneGroup {
        StoneGroup {
            color,
            stones,
            liberties,
        }
    }

    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &BTreeSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &BTreeSet<Point> {
        &self.liberties
    }

    pub fn num_stones(&self) -> usize {
        self.stones.len()
    }

    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    /// Absorb `other` into this group. Liberties covered by a stone of the
    /// union are dropped; the shared contact point in particular stops
    /// being a liberty of either side.
    fn merge_in(&mut self, other: StoneGroup) {
        self.stones.extend(other.stones);
        let stones = &self.stones;
        self.liberties.retain(|p| !stones.contains(p));
        for liberty in other.liberties {
            if !self.stones.contains(&liberty) {
                self.liberties.insert(liberty);
            }
        }
    }

    fn add_liberty(&mut self, point: Point) {
        self.liberties.insert(point);
    }

    fn remove_liberty(&mut self, point: Point) -> Result<(), BoardError> {
        if !self.liberties.remove(&point) {
            return Err(BoardError::Inconsistency(
                "removing a liberty the group does not have",
            ));
        }
        Ok(())
    }
}

/// A Go board of fixed dimensions with an incrementally maintained
/// position hash.
#[derive(Debug)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Option<GroupId>>,
    groups: Vec<Option<StoneGroup>>,
    hash: u64,
}

impl Board {
    /// Create an empty `width` x `height` board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or exceeds
    /// [`zobrist::MAX_BOARD_SIZE`].
    pub fn new(width: u16, height: u16) -> Board {
        assert!(
            (1..=zobrist::MAX_BOARD_SIZE).contains(&width)
                && (1..=zobrist::MAX_BOARD_SIZE).contains(&height),
            "board dimensions must be within 1..={}",
            zobrist::MAX_BOARD_SIZE,
        );
        Board {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            groups: Vec::new(),
            hash: zobrist::empty_board(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Position hash: the empty-board constant XORed with the code of
    /// every stone on the board.
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.height).contains(&point.row) && (1..=self.width).contains(&point.col)
    }

    fn idx(&self, point: Point) -> usize {
        (point.row as usize - 1) * self.width as usize + (point.col as usize - 1)
    }

    /// Color of the stone on `point`, if any. Off-grid points read as
    /// empty.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.group_at(point).map(|group| group.color())
    }

    /// The group occupying `point`, if any.
    pub fn group_at(&self, point: Point) -> Option<&StoneGroup> {
        if !self.is_on_grid(point) {
            return None;
        }
        let id = self.cells[self.idx(point)]?;
        self.groups[id.0 as usize].as_ref()
    }

    /// All live groups on the board.
    pub fn groups(&self) -> impl Iterator<Item = &StoneGroup> {
        self.groups.iter().filter_map(|slot| slot.as_ref())
    }

    /// Put a stone of `player` on `point`, merging adjacent friendly
    /// groups and capturing enemy groups left without liberties.
    ///
    /// Placement ignores turn order, so positions can be set up stone by
    /// stone. Self-capture and ko are the game state's concern, not the
    /// board's: a move that takes a group's last liberty captures it even
    /// if the placed stone ends up with none of its own.
    ///
    /// # Errors
    ///
    /// [`BoardError::OutOfBounds`] or [`BoardError::Occupied`] if the
    /// point cannot take a stone; [`BoardError::Inconsistency`] if the
    /// bookkeeping disagrees with itself while resolving captures.
    pub fn place_stone(&mut self, player: Player, point: Point) -> Result<(), BoardError> {
        if !self.is_on_grid(point) {
            return Err(BoardError::OutOfBounds(point));
        }
        if self.cells[self.idx(point)].is_some() {
            return Err(BoardError::Occupied(point));
        }

        let mut same_color: Vec<GroupId> = Vec::new();
        let mut other_color: Vec<GroupId> = Vec::new();
        let mut liberties: BTreeSet<Point> = BTreeSet::new();
        for nbr in point.neighbors() {
            if !self.is_on_grid(nbr) {
                continue;
            }
            match self.cells[self.idx(nbr)] {
                None => {
                    liberties.insert(nbr);
                }
                Some(id) => {
                    let group = self.groups[id.0 as usize]
                        .as_ref()
                        .ok_or(BoardError::Inconsistency("cell points at a freed group"))?;
                    let bucket = if group.color() == player {
                        &mut same_color
                    } else {
                        &mut other_color
                    };
                    if !bucket.contains(&id) {
                        bucket.push(id);
                    }
                }
            }
        }

        // Singleton group for the new stone, then absorb each distinct
        // friendly neighbor chain.
        let mut group = StoneGroup::new(player, BTreeSet::from([point]), liberties);
        for id in same_color {
            let absorbed = self.take_group(id)?;
            group.merge_in(absorbed);
        }
        let stones: Vec<Point> = group.stones().iter().copied().collect();
        let new_id = self.insert_group(group);
        for stone in stones {
            let i = self.idx(stone);
            self.cells[i] = Some(new_id);
        }

        self.hash ^= zobrist::stone_code(point, player);

        // Enemy chains lose the placed point as a liberty; any chain left
        // at zero comes off the board.
        for id in other_color {
            let captured = {
                let group = self.group_mut(id)?;
                group.remove_liberty(point)?;
                group.num_liberties() == 0
            };
            if captured {
                self.remove_group(id)?;
            }
        }
        Ok(())
    }

    /// Whether `point` is an eye for `color`: an empty point whose on-grid
    /// orthogonal neighbors are all `color`, with enough friendly diagonal
    /// cover (all four corners when the point touches the edge, at least
    /// three otherwise).
    pub fn is_point_an_eye(&self, point: Point, color: Player) -> bool {
        if !self.is_on_grid(point) || self.get(point).is_some() {
            return false;
        }
        for nbr in point.neighbors() {
            if self.is_on_grid(nbr) && self.get(nbr) != Some(color) {
                return false;
            }
        }
        let mut friendly = 0;
        let mut off_grid = 0;
        for diag in point.diagonals() {
            if !self.is_on_grid(diag) {
                off_grid += 1;
            } else if self.get(diag) == Some(color) {
                friendly += 1;
            }
        }
        if off_grid > 0 {
            friendly + off_grid == 4
        } else {
            friendly >= 3
        }
    }

    fn insert_group(&mut self, group: StoneGroup) -> GroupId {
        let id = GroupId(self.groups.len() as u32);
        self.groups.push(Some(group));
        id
    }

    fn take_group(&mut self, id: GroupId) -> Result<StoneGroup, BoardError> {
        self.groups[id.0 as usize]
            .take()
            .ok_or(BoardError::Inconsistency("group slot already freed"))
    }

    fn group_mut(&mut self, id: GroupId) -> Result<&mut StoneGroup, BoardError> {
        self.groups[id.0 as usize]
            .as_mut()
            .ok_or(BoardError::Inconsistency("group slot already freed"))
    }

    /// Take a captured group off the board. Each vacated point returns as
    /// a liberty to every adjacent surviving group and its stone code is
    /// XORed back out of the hash.
    fn remove_group(&mut self, id: GroupId) -> Result<(), BoardError> {
        {
            let group = self.groups[id.0 as usize]
                .as_ref()
                .ok_or(BoardError::Inconsistency("group slot already freed"))?;
            for &stone in group.stones() {
                if self.cells[self.idx(stone)] != Some(id) {
                    return Err(BoardError::Inconsistency(
                        "captured stone does not map to its group",
                    ));
                }
            }
        }
        let group = self.take_group(id)?;
        for &stone in group.stones() {
            for nbr in stone.neighbors() {
                if !self.is_on_grid(nbr) {
                    continue;
                }
                if let Some(nbr_id) = self.cells[self.idx(nbr)] {
                    if nbr_id != id {
                        self.group_mut(nbr_id)?.add_liberty(stone);
                    }
                }
            }
            let i = self.idx(stone);
            self.cells[i] = None;
            self.hash ^= zobrist::stone_code(stone, group.color());
        }
        Ok(())
    }
}

impl Clone for Board {
    /// Copies compact the arena: only live groups survive, renumbered
    /// densely, with cells repointed to the new handles.
    fn clone(&self) -> Board {
        let mut cells = vec![None; self.cells.len()];
        let mut groups = Vec::new();
        for slot in &self.groups {
            let Some(group) = slot else { continue };
            let id = GroupId(groups.len() as u32);
            for &stone in group.stones() {
                cells[self.idx(stone)] = Some(id);
            }
            groups.push(Some(group.clone()));
        }
        Board {
            width: self.width,
            height: self.height,
            cells,
            groups,
            hash: self.hash,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.height).rev() {
            write!(f, "{row:02} ")?;
            for col in 1..=self.width {
                let mark = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'x',
                    Some(Player::White) => 'o',
                    None => '.',
                };
                write!(f, "{mark} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 1..=self.width {
            let letter = COLS.as_bytes()[col as usize - 1] as char;
            write!(f, "{letter} ")?;
        }
        writeln!(f)
    }
}
