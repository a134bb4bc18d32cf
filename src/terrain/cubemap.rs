//! Six-face, multi-channel grid storage addressed by pixel or by face UV.

use glam::Vec3;
use rayon::prelude::*;

use crate::geometry::{CubeFace, FaceCoord};

/// A cubemap of `resolution x resolution` pixels per face with `channels`
/// floats per pixel.
///
/// Storage is one contiguous buffer laid out `[face][row][col][channel]`,
/// which is the order a 6-layer texture array upload expects. Pixel
/// `(face, i, j)` is column `i` (along u) and row `j` (along v).
#[derive(Debug, Clone, PartialEq)]
pub struct CubemapData {
    resolution: u32,
    channels: usize,
    data: Vec<f32>,
}

impl CubemapData {
    /// Allocates a zero-filled cubemap.
    ///
    /// # Panics
    /// Panics if `resolution` or `channels` is zero.
    pub fn new(resolution: u32, channels: usize) -> Self {
        Self::filled(resolution, channels, 0.0)
    }

    /// Allocates a cubemap with every sample set to `value`.
    pub fn filled(resolution: u32, channels: usize, value: f32) -> Self {
        assert!(resolution > 0, "cubemap resolution must be positive");
        assert!(channels > 0, "cubemap needs at least one channel");
        let len = CubeFace::COUNT * (resolution as usize).pow(2) * channels;
        Self {
            resolution,
            channels,
            data: vec![value; len],
        }
    }

    /// Builds a single-channel cubemap by evaluating `f` at every pixel's
    /// sphere direction.
    pub fn from_fn<F>(resolution: u32, f: F) -> Self
    where
        F: Fn(Vec3) -> f32 + Sync,
    {
        let mut map = Self::new(resolution, 1);
        map.par_faces_mut().for_each(|mut view| {
            for j in 0..view.resolution() {
                for i in 0..view.resolution() {
                    let dir = view.pixel_direction(i, j);
                    view.set(i, j, 0, f(dir));
                }
            }
        });
        map
    }

    /// Width/height of each face in pixels.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Floats stored per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Distance between adjacent pixel centres in face UV units (`1/R`).
    pub fn grid_spacing(&self) -> f32 {
        1.0 / self.resolution as f32
    }

    /// Number of floats stored for one face.
    pub fn face_len(&self) -> usize {
        (self.resolution as usize).pow(2) * self.channels
    }

    /// The whole buffer in `[face][row][col][channel]` order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The buffer region of a single face.
    pub fn face_slice(&self, face: CubeFace) -> &[f32] {
        let len = self.face_len();
        &self.data[face.index() * len..(face.index() + 1) * len]
    }

    #[inline]
    fn index(&self, face: CubeFace, i: u32, j: u32, channel: usize) -> usize {
        debug_assert!(i < self.resolution && j < self.resolution && channel < self.channels);
        let res = self.resolution as usize;
        ((face.index() * res + j as usize) * res + i as usize) * self.channels + channel
    }

    /// Reads one sample.
    #[inline]
    pub fn pixel(&self, face: CubeFace, i: u32, j: u32, channel: usize) -> f32 {
        self.data[self.index(face, i, j, channel)]
    }

    /// Mutable access to one sample.
    #[inline]
    pub fn pixel_mut(&mut self, face: CubeFace, i: u32, j: u32, channel: usize) -> &mut f32 {
        let idx = self.index(face, i, j, channel);
        &mut self.data[idx]
    }

    /// Writes one sample.
    #[inline]
    pub fn set_pixel(&mut self, face: CubeFace, i: u32, j: u32, channel: usize, value: f32) {
        *self.pixel_mut(face, i, j, channel) = value;
    }

    /// Face coordinate of the centre of pixel `(face, i, j)`.
    pub fn pixel_coordinates(&self, face: CubeFace, i: u32, j: u32) -> FaceCoord {
        pixel_center(self.resolution, face, i, j)
    }

    /// Sphere direction of the centre of pixel `(face, i, j)`.
    pub fn pixel_direction(&self, face: CubeFace, i: u32, j: u32) -> Vec3 {
        self.pixel_coordinates(face, i, j).to_sphere_point()
    }

    /// Bilinear interpolation of `channel` over the 2x2 pixels around `coord`.
    ///
    /// Never reads across a face boundary; indices are clamped to the face.
    pub fn bilinear(&self, coord: FaceCoord, channel: usize) -> f32 {
        let (i0, i1, fx) = cell_bounds(self.resolution, coord.u);
        let (j0, j1, fy) = cell_bounds(self.resolution, coord.v);
        let face = coord.face;

        let p00 = self.pixel(face, i0, j0, channel);
        let p10 = self.pixel(face, i1, j0, channel);
        let p01 = self.pixel(face, i0, j1, channel);
        let p11 = self.pixel(face, i1, j1, channel);

        let top = p00 + (p10 - p00) * fx;
        let bottom = p01 + (p11 - p01) * fx;
        top + (bottom - top) * fy
    }

    /// The four pixels surrounding `coord` as `(i0, i1, j0, j1)`.
    pub fn surrounding_cells(&self, coord: FaceCoord) -> (u32, u32, u32, u32) {
        let (i0, i1, _) = cell_bounds(self.resolution, coord.u);
        let (j0, j1, _) = cell_bounds(self.resolution, coord.v);
        (i0, i1, j0, j1)
    }

    /// Adds `amount` to one sample.
    #[inline]
    pub fn add_to_pixel(&mut self, face: CubeFace, i: u32, j: u32, channel: usize, amount: f32) {
        *self.pixel_mut(face, i, j, channel) += amount;
    }

    /// Global (min, max) of `channel` across all faces.
    pub fn range(&self, channel: usize) -> (f32, f32) {
        self.data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Sum of `channel` over every pixel.
    pub fn sum(&self, channel: usize) -> f64 {
        self.data
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .map(|&v| v as f64)
            .sum()
    }

    /// Disjoint mutable views, one per face, for face-parallel passes.
    pub fn par_faces_mut(&mut self) -> impl IndexedParallelIterator<Item = FaceViewMut<'_>> + '_ {
        let resolution = self.resolution;
        let channels = self.channels;
        let face_len = self.face_len();
        self.data
            .par_chunks_mut(face_len)
            .enumerate()
            .map(move |(index, data)| FaceViewMut {
                face: CubeFace::ALL[index],
                resolution,
                channels,
                data,
            })
    }
}

/// Exclusive view of one face's pixels inside a [`CubemapData`].
#[derive(Debug)]
pub struct FaceViewMut<'a> {
    face: CubeFace,
    resolution: u32,
    channels: usize,
    data: &'a mut [f32],
}

impl FaceViewMut<'_> {
    pub fn face(&self) -> CubeFace {
        self.face
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    fn index(&self, i: u32, j: u32, channel: usize) -> usize {
        debug_assert!(i < self.resolution && j < self.resolution && channel < self.channels);
        (j as usize * self.resolution as usize + i as usize) * self.channels + channel
    }

    #[inline]
    pub fn get(&self, i: u32, j: u32, channel: usize) -> f32 {
        self.data[self.index(i, j, channel)]
    }

    #[inline]
    pub fn set(&mut self, i: u32, j: u32, channel: usize, value: f32) {
        let idx = self.index(i, j, channel);
        self.data[idx] = value;
    }

    /// Face coordinate of the centre of pixel `(i, j)` on this face.
    pub fn pixel_coordinates(&self, i: u32, j: u32) -> FaceCoord {
        pixel_center(self.resolution, self.face, i, j)
    }

    /// Sphere direction of the centre of pixel `(i, j)` on this face.
    pub fn pixel_direction(&self, i: u32, j: u32) -> Vec3 {
        self.pixel_coordinates(i, j).to_sphere_point()
    }
}

fn pixel_center(resolution: u32, face: CubeFace, i: u32, j: u32) -> FaceCoord {
    let u = (i as f32 + 0.5) / resolution as f32;
    let v = (j as f32 + 0.5) / resolution as f32;
    FaceCoord::new(face, u, v)
}

/// Lower/upper pixel index around continuous coordinate `t` in [0, 1] and
/// the interpolation fraction between them.
#[inline]
fn cell_bounds(resolution: u32, t: f32) -> (u32, u32, f32) {
    let x = t * resolution as f32 - 0.5;
    let floor = x.floor();
    let frac = x - floor;
    let max = resolution as i64 - 1;
    let lo = (floor as i64).clamp(0, max) as u32;
    let hi = (floor as i64 + 1).clamp(0, max) as u32;
    (lo, hi, frac)
}
