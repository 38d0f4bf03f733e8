//! The module grid and its fixed structure.
//!
//! [`ModuleMatrix::new`] lays out every function pattern of a version and
//! reserves the format and version information areas; everything left over is
//! tagged [`ModuleKind::Data`] and receives codeword bits through
//! [`ModuleMatrix::draw_codewords`]. Coordinates are `(x, y)` with `x` the
//! column and `y` the row, origin at the top left.

use crate::qrcode::{Mask, QrCodeEcc, Version};
use crate::tables;

/// What a module is part of. Only `Data` modules are ever masked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ModuleKind {
    Finder,
    Separator,
    Timing,
    Alignment,
    FormatInfo,
    VersionInfo,
    /// The single always-dark module next to the bottom-left finder.
    DarkModule,
    Data,
    /// Outside the symbol, in the light border renderers add.
    Quiet,
}

/// A single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Module {
    dark: bool,
    kind: ModuleKind,
}

impl Module {
    pub const QUIET: Module = Module {
        dark: false,
        kind: ModuleKind::Quiet,
    };

    pub fn new(dark: bool, kind: ModuleKind) -> Self {
        Self { dark, kind }
    }

    pub fn is_dark(self) -> bool {
        self.dark
    }

    pub fn kind(self) -> ModuleKind {
        self.kind
    }

    /// True for modules belonging to a function pattern or reserved area.
    pub fn is_function(self) -> bool {
        !matches!(self.kind, ModuleKind::Data | ModuleKind::Quiet)
    }
}

/// A square grid of `4 * version + 17` modules, stored row by row.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModuleMatrix {
    version: Version,
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Creates the grid for a version with all function patterns drawn and the
    /// format/version areas reserved (light). Data modules start light.
    pub fn new(version: Version) -> Self {
        let size = usize::from(version.value()) * 4 + 17;
        let mut result = Self {
            version,
            size,
            modules: vec![Module::new(false, ModuleKind::Data); size * size],
        };
        result.draw_timing_patterns();
        result.draw_finder_pattern(3, 3);
        result.draw_finder_pattern(size - 4, 3);
        result.draw_finder_pattern(3, size - 4);
        result.draw_alignment_patterns();
        result.reserve_format_areas();
        result.reserve_version_areas();
        result.set(8, size - 8, true, ModuleKind::DarkModule);
        result
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules, between 21 and 177.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All modules, row-major.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// # Panics
    ///
    /// Panics if the coordinates are outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Module {
        assert!(x < self.size && y < self.size, "Coordinates out of range");
        self.modules[y * self.size + x]
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).dark
    }

    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|m| m.dark).count()
    }

    fn set(&mut self, x: usize, y: usize, dark: bool, kind: ModuleKind) {
        assert!(x < self.size && y < self.size, "Coordinates out of range");
        self.modules[y * self.size + x] = Module { dark, kind };
    }

    fn set_unbounded(&mut self, x: i32, y: i32, dark: bool, kind: ModuleKind) {
        let range = 0..self.size as i32;
        if range.contains(&x) && range.contains(&y) {
            self.set(x as usize, y as usize, dark, kind);
        }
    }

    fn set_value(&mut self, x: usize, y: usize, dark: bool) {
        let kind = self.get(x, y).kind;
        self.set(x, y, dark, kind);
    }

    fn draw_timing_patterns(&mut self) {
        // Finders and alignment patterns drawn afterwards overwrite the ends
        for i in 0..self.size {
            self.set(6, i, i % 2 == 0, ModuleKind::Timing);
            self.set(i, 6, i % 2 == 0, ModuleKind::Timing);
        }
    }

    // 7x7 finder plus its one-module separator ring, clipped at the edges
    fn draw_finder_pattern(&mut self, x: usize, y: usize) {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let dist: i32 = dx.abs().max(dy.abs());
                let kind = if dist == 4 {
                    ModuleKind::Separator
                } else {
                    ModuleKind::Finder
                };
                self.set_unbounded(x as i32 + dx, y as i32 + dy, dist != 2 && dist != 4, kind);
            }
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let alignpatpos: &[u8] = tables::alignment_pattern_positions(self.version);
        let last = alignpatpos.len().saturating_sub(1);
        for (i, &pos0) in alignpatpos.iter().enumerate() {
            for (j, &pos1) in alignpatpos.iter().enumerate() {
                // Skip the three corners occupied by finders
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                for dy in -2i32..=2 {
                    for dx in -2i32..=2 {
                        let x = (i32::from(pos0) + dx) as usize;
                        let y = (i32::from(pos1) + dy) as usize;
                        self.set(x, y, dx.abs().max(dy.abs()) != 1, ModuleKind::Alignment);
                    }
                }
            }
        }
    }

    fn reserve_format_areas(&mut self) {
        for copy in format_info_positions(self.size) {
            for (x, y) in copy {
                self.set(x, y, false, ModuleKind::FormatInfo);
            }
        }
    }

    fn reserve_version_areas(&mut self) {
        if self.version.value() < 7 {
            return;
        }
        for (a, b) in version_info_positions(self.size) {
            self.set(a, b, false, ModuleKind::VersionInfo);
            self.set(b, a, false, ModuleKind::VersionInfo);
        }
    }

    /// Writes a 15-bit format information word into both reserved strips.
    pub fn draw_format_bits(&mut self, bits: u32) {
        for copy in format_info_positions(self.size) {
            for (i, (x, y)) in copy.into_iter().enumerate() {
                self.set_value(x, y, get_bit(bits, i));
            }
        }
    }

    /// Writes an 18-bit version information word into both reserved blocks.
    /// Does nothing below version 7.
    pub fn draw_version_bits(&mut self, bits: u32) {
        if self.version.value() < 7 {
            return;
        }
        for (i, (a, b)) in version_info_positions(self.size).into_iter().enumerate() {
            let bit = get_bit(bits, i);
            self.set_value(a, b, bit);
            self.set_value(b, a, bit);
        }
    }

    /// Places codeword bits into the data modules in the standard zig-zag
    /// order: two-column strips from the right edge, alternating upward and
    /// downward, skipping the vertical timing column. Data modules left over
    /// once the bits run out are set light.
    pub fn draw_codewords(&mut self, data: &[u8]) {
        let totalbits = data.len() * 8;
        let size = self.size as i32;
        let mut i: usize = 0;
        let mut right: i32 = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            for vert in 0..size {
                for j in 0..2 {
                    let x = (right - j) as usize;
                    let upward: bool = ((right + 1) & 2) == 0;
                    let y = (if upward { size - 1 - vert } else { vert }) as usize;
                    if self.get(x, y).kind != ModuleKind::Data {
                        continue;
                    }
                    let bit = i < totalbits && get_bit(u32::from(data[i >> 3]), 7 - (i & 7));
                    self.set_value(x, y, bit);
                    i += 1;
                }
            }
            right -= 2;
        }
        debug_assert!(i >= totalbits, "Not all codeword bits were placed");
    }

    /// XORs the mask pattern into every data module. Applying the same mask
    /// twice restores the original values.
    pub fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let index = y * self.size + x;
                if self.modules[index].kind == ModuleKind::Data && mask.inverts(x, y) {
                    self.modules[index].dark ^= true;
                }
            }
        }
    }

    /// Draws the format bits for the given level and mask.
    pub fn draw_format(&mut self, ecl: QrCodeEcc, mask: Mask) {
        self.draw_format_bits(crate::mask::format_info_bits(ecl, mask));
    }

    /// One row as dark flags.
    pub fn row(&self, y: usize) -> impl Iterator<Item = bool> + '_ {
        self.modules[y * self.size..(y + 1) * self.size]
            .iter()
            .map(|m| m.dark)
    }

    /// One column as dark flags.
    pub fn column(&self, x: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.size).map(move |y| self.modules[y * self.size + x].dark)
    }
}

// Bit i of the format word goes to position i of each copy
fn format_info_positions(size: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for i in 0..6 {
        first[i] = (8, i);
    }
    first[6] = (8, 7);
    first[7] = (8, 8);
    first[8] = (7, 8);
    for i in 9..15 {
        first[i] = (14 - i, 8);
    }
    for i in 0..8 {
        second[i] = (size - 1 - i, 8);
    }
    for i in 8..15 {
        second[i] = (8, size - 15 + i);
    }
    [first, second]
}

// (a, b) for the top-right block; the bottom-left block is its transpose
fn version_info_positions(size: usize) -> [(usize, usize); 18] {
    let mut result = [(0, 0); 18];
    for (i, pos) in result.iter_mut().enumerate() {
        *pos = (size - 11 + i % 3, i / 3);
    }
    result
}

fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}
