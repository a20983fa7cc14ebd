use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};
use std::str::FromStr;

use num_traits::real::Real;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vec4<T> {
  pub x: T,
  pub y: T,
  pub z: T,
  pub w: T,
}

pub fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
  Vec4::new(x, y, z, w)
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Vec4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Vec4<T> {}

impl<T> Vec4<T> {
  #[inline(always)]
  pub const fn new(x: T, y: T, z: T, w: T) -> Self {
    Self { x, y, z, w }
  }
}

impl<T> Vec4<T>
where
  T: Copy,
{
  #[inline(always)]
  pub fn to_tuple(&self) -> (T, T, T, T) {
    (self.x, self.y, self.z, self.w)
  }
}

impl<T> Vec4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  /// Sum of the squared components. Stays in `T`, no square root taken.
  #[inline]
  pub fn length2(&self) -> T {
    self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
  }
}

impl<T: Real> Vec4<T> {
  /// Euclidean length. Defined for real scalars only, since it takes a
  /// square root.
  #[inline]
  pub fn length(&self) -> T {
    self.length2().sqrt()
  }
}

impl<T> Neg for Vec4<T>
where
  T: Neg<Output = T>,
{
  type Output = Self;

  fn neg(self) -> Self {
    Self {
      x: -self.x,
      y: -self.y,
      z: -self.z,
      w: -self.w,
    }
  }
}

impl<T> Add for Vec4<T>
where
  T: Add<Output = T>,
{
  type Output = Self;

  fn add(self, other: Self) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
      z: self.z + other.z,
      w: self.w + other.w,
    }
  }
}

impl<T> Sub for Vec4<T>
where
  T: Sub<Output = T>,
{
  type Output = Self;

  fn sub(self, other: Self) -> Self {
    Self {
      x: self.x - other.x,
      y: self.y - other.y,
      z: self.z - other.z,
      w: self.w - other.w,
    }
  }
}

impl<T> Mul<T> for Vec4<T>
where
  T: Mul<Output = T> + Copy,
{
  type Output = Self;

  fn mul(self, s: T) -> Self {
    Self {
      x: self.x * s,
      y: self.y * s,
      z: self.z * s,
      w: self.w * s,
    }
  }
}

impl<T> Div<T> for Vec4<T>
where
  T: Div<Output = T> + Copy,
{
  type Output = Self;

  fn div(self, s: T) -> Self {
    Self {
      x: self.x / s,
      y: self.y / s,
      z: self.z / s,
      w: self.w / s,
    }
  }
}

impl<T> AddAssign for Vec4<T>
where
  T: AddAssign<T>,
{
  fn add_assign(&mut self, other: Self) {
    self.x += other.x;
    self.y += other.y;
    self.z += other.z;
    self.w += other.w;
  }
}

impl<T> SubAssign for Vec4<T>
where
  T: SubAssign<T>,
{
  fn sub_assign(&mut self, other: Self) {
    self.x -= other.x;
    self.y -= other.y;
    self.z -= other.z;
    self.w -= other.w;
  }
}

impl<T> MulAssign<T> for Vec4<T>
where
  T: MulAssign<T> + Copy,
{
  fn mul_assign(&mut self, s: T) {
    self.x *= s;
    self.y *= s;
    self.z *= s;
    self.w *= s;
  }
}

impl<T> DivAssign<T> for Vec4<T>
where
  T: DivAssign<T> + Copy,
{
  fn div_assign(&mut self, s: T) {
    self.x /= s;
    self.y /= s;
    self.z /= s;
    self.w /= s;
  }
}

impl<T> Index<usize> for Vec4<T> {
  type Output = T;

  /// Indices 0 through 3 map to x, y, z, w. Anything else is a range
  /// error.
  fn index(&self, i: usize) -> &T {
    match i {
      0 => &self.x,
      1 => &self.y,
      2 => &self.z,
      3 => &self.w,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T> IndexMut<usize> for Vec4<T> {
  fn index_mut(&mut self, i: usize) -> &mut T {
    match i {
      0 => &mut self.x,
      1 => &mut self.y,
      2 => &mut self.z,
      3 => &mut self.w,
      _ => panic!("vector component index out of range: {i}"),
    }
  }
}

impl<T> Zero for Vec4<T>
where
  T: Zero,
{
  #[inline(always)]
  fn zero() -> Self {
    Self {
      x: T::zero(),
      y: T::zero(),
      z: T::zero(),
      w: T::zero(),
    }
  }

  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.x.is_zero() && self.y.is_zero() && self.z.is_zero() && self.w.is_zero()
  }
}

impl<T> fmt::Display for Vec4<T>
where
  T: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} {} {} {}", self.x, self.y, self.z, self.w)
  }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseVectorError {
  #[error("expected 4 vector components, found {found}")]
  ComponentCount { found: usize },
  #[error("invalid scalar token `{token}`")]
  InvalidScalar { token: String },
}

impl<T> FromStr for Vec4<T>
where
  T: FromStr,
{
  type Err = ParseVectorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 4 {
      return Err(ParseVectorError::ComponentCount {
        found: tokens.len(),
      });
    }
    let parse = |token: &str| {
      token.parse().map_err(|_| ParseVectorError::InvalidScalar {
        token: token.to_owned(),
      })
    };
    Ok(Self {
      x: parse(tokens[0])?,
      y: parse(tokens[1])?,
      z: parse(tokens[2])?,
      w: parse(tokens[3])?,
    })
  }
}

impl<T> From<[T; 4]> for Vec4<T>
where
  T: Copy,
{
  fn from(v: [T; 4]) -> Self {
    Self {
      x: v[0],
      y: v[1],
      z: v[2],
      w: v[3],
    }
  }
}

impl<T> From<(T, T, T, T)> for Vec4<T> {
  fn from(v: (T, T, T, T)) -> Self {
    Self {
      x: v.0,
      y: v.1,
      z: v.2,
      w: v.3,
    }
  }
}

impl<T> From<Vec4<T>> for [T; 4] {
  fn from(v: Vec4<T>) -> Self {
    [v.x, v.y, v.z, v.w]
  }
}

impl<T> AsRef<[T; 4]> for Vec4<T> {
  fn as_ref(&self) -> &[T; 4] {
    unsafe { std::mem::transmute(self) }
  }
}

impl<T> AsMut<[T; 4]> for Vec4<T> {
  fn as_mut(&mut self) -> &mut [T; 4] {
    unsafe { std::mem::transmute(self) }
  }
}

impl_scalar_ops!(Vec4<usize> { x, y, z, w });
impl_scalar_ops!(Vec4<u8>    { x, y, z, w });
impl_scalar_ops!(Vec4<u16>   { x, y, z, w });
impl_scalar_ops!(Vec4<u32>   { x, y, z, w });
impl_scalar_ops!(Vec4<u64>   { x, y, z, w });
impl_scalar_ops!(Vec4<isize> { x, y, z, w });
impl_scalar_ops!(Vec4<i8>    { x, y, z, w });
impl_scalar_ops!(Vec4<i16>   { x, y, z, w });
impl_scalar_ops!(Vec4<i32>   { x, y, z, w });
impl_scalar_ops!(Vec4<i64>   { x, y, z, w });
impl_scalar_ops!(Vec4<f32>   { x, y, z, w });
impl_scalar_ops!(Vec4<f64>   { x, y, z, w });

#[test]
fn default_is_zero() {
  assert_eq!(Vec4::<i32>::default(), Vec4::zero());
  assert!(Vec4::<f64>::default().is_zero());
}

#[test]
fn negation_involution() {
  let v = vec4(1.0f32, -2.0, 3.5, -4.25);
  assert_eq!(-(-v), v);
}

#[test]
fn componentwise_add_sub() {
  let u = vec4(1, 2, 3, 4);
  let v = vec4(10, 20, 30, 40);
  assert_eq!(u + v, vec4(11, 22, 33, 44));
  assert_eq!(v - u, vec4(9, 18, 27, 36));
}

#[test]
fn assign_ops_mutate_in_place() {
  let mut v = vec4(1.0f64, 2.0, 3.0, 4.0);
  v += vec4(1.0, 1.0, 1.0, 1.0);
  assert_eq!(v, vec4(2.0, 3.0, 4.0, 5.0));
  v -= vec4(2.0, 2.0, 2.0, 2.0);
  assert_eq!(v, vec4(0.0, 1.0, 2.0, 3.0));
  v *= 2.0;
  assert_eq!(v, vec4(0.0, 2.0, 4.0, 6.0));
  v /= 2.0;
  assert_eq!(v, vec4(0.0, 1.0, 2.0, 3.0));
}

#[test]
fn scalar_scale_both_orders() {
  let v = vec4(1.0f32, 2.0, 3.0, 4.0);
  assert_eq!(v * 2.0, vec4(2.0, 4.0, 6.0, 8.0));
  assert_eq!(2.0 * v, v * 2.0);
}

#[test]
fn scalar_divide() {
  let v = vec4(2.0f32, 4.0, 6.0, 8.0);
  assert_eq!(v / 2.0, vec4(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn length_is_euclidean() {
  assert_eq!(vec4(3.0f32, 4.0, 0.0, 0.0).length(), 5.0);
}

#[test]
fn length_matches_cgmath() {
  use cgmath::InnerSpace;
  let v = vec4(1.0f64, 2.0, 3.0, 4.0);
  let cg = cgmath::vec4(1.0f64, 2.0, 3.0, 4.0);
  assert_eq!(v.length(), cg.magnitude());
}

#[test]
fn length2_stays_in_the_scalar_type() {
  let v: Vec4<i32> = vec4(1, 2, 3, 4);
  assert_eq!(v.length2(), 30);
}

#[test]
fn component_indexing() {
  let mut v = vec4(1, 2, 3, 4);
  assert_eq!((v[0], v[1], v[2], v[3]), (1, 2, 3, 4));
  v[2] = 30;
  assert_eq!(v, vec4(1, 2, 30, 4));
}

#[test]
#[should_panic(expected = "out of range")]
fn component_index_out_of_range() {
  let v = vec4(1, 2, 3, 4);
  let _ = v[4];
}

#[test]
fn display_format() {
  assert_eq!(vec4(1, -2, 3, -4).to_string(), "1 -2 3 -4");
}

#[test]
fn parse_round_trip() {
  let v = vec4(1, -2, 3, -4);
  let restored: Vec4<i32> = v.to_string().parse().unwrap();
  assert_eq!(restored, v);

  let v = vec4(1.5f32, -2.25, 0.5, 4.0);
  let restored: Vec4<f32> = v.to_string().parse().unwrap();
  assert_eq!(restored, v);
}

#[test]
fn parse_rejects_short_input() {
  let err = "1 2 3".parse::<Vec4<f32>>().unwrap_err();
  assert_eq!(err, ParseVectorError::ComponentCount { found: 3 });
}

#[test]
fn parse_rejects_trailing_tokens() {
  let err = "1 2 3 4 5".parse::<Vec4<f32>>().unwrap_err();
  assert_eq!(err, ParseVectorError::ComponentCount { found: 5 });
}

#[test]
fn parse_rejects_bad_token() {
  let err = "1 2 x 4".parse::<Vec4<f32>>().unwrap_err();
  assert_eq!(
    err,
    ParseVectorError::InvalidScalar {
      token: "x".to_owned()
    }
  );
}
