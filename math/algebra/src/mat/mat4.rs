use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};
use std::str::FromStr;

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::vec::Vec4;

/// Row-major 4x4 matrix: the `a` fields are the first row, the `d`
/// fields the last.
#[repr(C)]
#[rustfmt::skip]
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Mat4<T> {
  pub a1: T, pub a2: T, pub a3: T, pub a4: T,
  pub b1: T, pub b2: T, pub b3: T, pub b4: T,
  pub c1: T, pub c2: T, pub c3: T, pub c4: T,
  pub d1: T, pub d2: T, pub d3: T, pub d4: T,
}

unsafe impl<T: bytemuck::Zeroable> bytemuck::Zeroable for Mat4<T> {}
unsafe impl<T: bytemuck::Pod> bytemuck::Pod for Mat4<T> {}

#[rustfmt::skip]
impl<T> Mat4<T> {
  pub const fn new(
    m11: T, m12: T, m13: T, m14: T,
    m21: T, m22: T, m23: T, m24: T,
    m31: T, m32: T, m33: T, m34: T,
    m41: T, m42: T, m43: T, m44: T,
  ) -> Self {
    Self {
      a1: m11, a2: m12, a3: m13, a4: m14,
      b1: m21, b2: m22, b3: m23, b4: m24,
      c1: m31, c2: m32, c3: m33, c4: m34,
      d1: m41, d2: m42, d3: m43, d4: m44,
    }
  }
}

impl<T> Mat4<T>
where
  T: Zero + Copy,
{
  /// `d` on the main diagonal, zero everywhere else.
  pub fn diagonal(d: T) -> Self {
    let o = T::zero();
    #[rustfmt::skip]
    let m = Mat4::new(
      d, o, o, o,
      o, d, o, o,
      o, o, d, o,
      o, o, o, d,
    );
    m
  }
}

impl<T> Mat4<T>
where
  T: Zero + One + Copy,
{
  pub fn identity() -> Self {
    Self::diagonal(T::one())
  }
}

impl<T> Default for Mat4<T>
where
  T: Zero + One + Copy,
{
  /// The default matrix is the identity, not the zero matrix.
  fn default() -> Self {
    Self::identity()
  }
}

impl<T> Index<(usize, usize)> for Mat4<T> {
  type Output = T;

  fn index(&self, (row, col): (usize, usize)) -> &T {
    assert!(
      row < 4 && col < 4,
      "matrix element index out of range: ({row}, {col})"
    );
    let m: &[T; 16] = self.as_ref();
    &m[row * 4 + col]
  }
}

impl<T> IndexMut<(usize, usize)> for Mat4<T> {
  fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
    assert!(
      row < 4 && col < 4,
      "matrix element index out of range: ({row}, {col})"
    );
    let m: &mut [T; 16] = self.as_mut();
    &mut m[row * 4 + col]
  }
}

impl<T> Add for Mat4<T>
where
  T: Add<Output = T>,
{
  type Output = Self;

  fn add(self, m: Self) -> Self {
    Self {
      a1: self.a1 + m.a1,
      a2: self.a2 + m.a2,
      a3: self.a3 + m.a3,
      a4: self.a4 + m.a4,

      b1: self.b1 + m.b1,
      b2: self.b2 + m.b2,
      b3: self.b3 + m.b3,
      b4: self.b4 + m.b4,

      c1: self.c1 + m.c1,
      c2: self.c2 + m.c2,
      c3: self.c3 + m.c3,
      c4: self.c4 + m.c4,

      d1: self.d1 + m.d1,
      d2: self.d2 + m.d2,
      d3: self.d3 + m.d3,
      d4: self.d4 + m.d4,
    }
  }
}

impl<T> Sub for Mat4<T>
where
  T: Sub<Output = T>,
{
  type Output = Self;

  fn sub(self, m: Self) -> Self {
    Self {
      a1: self.a1 - m.a1,
      a2: self.a2 - m.a2,
      a3: self.a3 - m.a3,
      a4: self.a4 - m.a4,

      b1: self.b1 - m.b1,
      b2: self.b2 - m.b2,
      b3: self.b3 - m.b3,
      b4: self.b4 - m.b4,

      c1: self.c1 - m.c1,
      c2: self.c2 - m.c2,
      c3: self.c3 - m.c3,
      c4: self.c4 - m.c4,

      d1: self.d1 - m.d1,
      d2: self.d2 - m.d2,
      d3: self.d3 - m.d3,
      d4: self.d4 - m.d4,
    }
  }
}

impl<T> Mul<T> for Mat4<T>
where
  T: Mul<Output = T> + Copy,
{
  type Output = Self;

  fn mul(self, s: T) -> Self {
    Self {
      a1: self.a1 * s,
      a2: self.a2 * s,
      a3: self.a3 * s,
      a4: self.a4 * s,

      b1: self.b1 * s,
      b2: self.b2 * s,
      b3: self.b3 * s,
      b4: self.b4 * s,

      c1: self.c1 * s,
      c2: self.c2 * s,
      c3: self.c3 * s,
      c4: self.c4 * s,

      d1: self.d1 * s,
      d2: self.d2 * s,
      d3: self.d3 * s,
      d4: self.d4 * s,
    }
  }
}

impl<T> Mul<Vec4<T>> for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Vec4<T>;

  fn mul(self, v: Vec4<T>) -> Vec4<T> {
    Vec4 {
      x: self.a1 * v.x + self.a2 * v.y + self.a3 * v.z + self.a4 * v.w,
      y: self.b1 * v.x + self.b2 * v.y + self.b3 * v.z + self.b4 * v.w,
      z: self.c1 * v.x + self.c2 * v.y + self.c3 * v.z + self.c4 * v.w,
      w: self.d1 * v.x + self.d2 * v.y + self.d3 * v.z + self.d4 * v.w,
    }
  }
}

impl<T> Mul for Mat4<T>
where
  T: Copy + Add<Output = T> + Mul<Output = T>,
{
  type Output = Self;

  fn mul(self, m: Self) -> Self {
    let a = self;

    Self {
      a1: a.a1 * m.a1 + a.a2 * m.b1 + a.a3 * m.c1 + a.a4 * m.d1,
      a2: a.a1 * m.a2 + a.a2 * m.b2 + a.a3 * m.c2 + a.a4 * m.d2,
      a3: a.a1 * m.a3 + a.a2 * m.b3 + a.a3 * m.c3 + a.a4 * m.d3,
      a4: a.a1 * m.a4 + a.a2 * m.b4 + a.a3 * m.c4 + a.a4 * m.d4,

      b1: a.b1 * m.a1 + a.b2 * m.b1 + a.b3 * m.c1 + a.b4 * m.d1,
      b2: a.b1 * m.a2 + a.b2 * m.b2 + a.b3 * m.c2 + a.b4 * m.d2,
      b3: a.b1 * m.a3 + a.b2 * m.b3 + a.b3 * m.c3 + a.b4 * m.d3,
      b4: a.b1 * m.a4 + a.b2 * m.b4 + a.b3 * m.c4 + a.b4 * m.d4,

      c1: a.c1 * m.a1 + a.c2 * m.b1 + a.c3 * m.c1 + a.c4 * m.d1,
      c2: a.c1 * m.a2 + a.c2 * m.b2 + a.c3 * m.c2 + a.c4 * m.d2,
      c3: a.c1 * m.a3 + a.c2 * m.b3 + a.c3 * m.c3 + a.c4 * m.d3,
      c4: a.c1 * m.a4 + a.c2 * m.b4 + a.c3 * m.c4 + a.c4 * m.d4,

      d1: a.d1 * m.a1 + a.d2 * m.b1 + a.d3 * m.c1 + a.d4 * m.d1,
      d2: a.d1 * m.a2 + a.d2 * m.b2 + a.d3 * m.c2 + a.d4 * m.d2,
      d3: a.d1 * m.a3 + a.d2 * m.b3 + a.d3 * m.c3 + a.d4 * m.d3,
      d4: a.d1 * m.a4 + a.d2 * m.b4 + a.d3 * m.c4 + a.d4 * m.d4,
    }
  }
}

impl<T> Zero for Mat4<T>
where
  T: Zero + Copy + PartialEq,
{
  #[inline(always)]
  fn zero() -> Self {
    let o = T::zero();
    #[rustfmt::skip]
    let m = Mat4::new(
      o, o, o, o,
      o, o, o, o,
      o, o, o, o,
      o, o, o, o,
    );
    m
  }

  #[inline(always)]
  fn is_zero(&self) -> bool {
    self.eq(&Self::zero())
  }
}

impl<T> One for Mat4<T>
where
  T: One + Zero + Copy,
{
  #[inline(always)]
  fn one() -> Self {
    Self::identity()
  }
}

impl<T> fmt::Display for Mat4<T>
where
  T: fmt::Display,
{
  /// Every element is followed by a tab, every row by a newline.
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "{}\t{}\t{}\t{}\t", self.a1, self.a2, self.a3, self.a4)?;
    writeln!(f, "{}\t{}\t{}\t{}\t", self.b1, self.b2, self.b3, self.b4)?;
    writeln!(f, "{}\t{}\t{}\t{}\t", self.c1, self.c2, self.c3, self.c4)?;
    writeln!(f, "{}\t{}\t{}\t{}\t", self.d1, self.d2, self.d3, self.d4)
  }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMatrixError {
  #[error("expected 16 matrix elements, found {found}")]
  ElementCount { found: usize },
  #[error("invalid scalar token `{token}`")]
  InvalidScalar { token: String },
}

impl<T> FromStr for Mat4<T>
where
  T: FromStr,
{
  type Err = ParseMatrixError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 16 {
      return Err(ParseMatrixError::ElementCount {
        found: tokens.len(),
      });
    }
    let parse = |token: &str| {
      token.parse().map_err(|_| ParseMatrixError::InvalidScalar {
        token: token.to_owned(),
      })
    };
    #[rustfmt::skip]
    let m = Mat4::new(
      parse(tokens[0])?,  parse(tokens[1])?,  parse(tokens[2])?,  parse(tokens[3])?,
      parse(tokens[4])?,  parse(tokens[5])?,  parse(tokens[6])?,  parse(tokens[7])?,
      parse(tokens[8])?,  parse(tokens[9])?,  parse(tokens[10])?, parse(tokens[11])?,
      parse(tokens[12])?, parse(tokens[13])?, parse(tokens[14])?, parse(tokens[15])?,
    );
    Ok(m)
  }
}

impl<T> From<[T; 16]> for Mat4<T>
where
  T: Copy,
{
  fn from(v: [T; 16]) -> Self {
    #[rustfmt::skip]
    let m = Mat4::new(
      v[0],  v[1],  v[2],  v[3],
      v[4],  v[5],  v[6],  v[7],
      v[8],  v[9],  v[10], v[11],
      v[12], v[13], v[14], v[15],
    );
    m
  }
}

impl<T> From<Mat4<T>> for [T; 16] {
  fn from(m: Mat4<T>) -> Self {
    [
      m.a1, m.a2, m.a3, m.a4, m.b1, m.b2, m.b3, m.b4, m.c1, m.c2, m.c3, m.c4, m.d1, m.d2, m.d3,
      m.d4,
    ]
  }
}

impl<T> AsRef<[T; 16]> for Mat4<T> {
  fn as_ref(&self) -> &[T; 16] {
    unsafe { std::mem::transmute(self) }
  }
}

impl<T> AsMut<[T; 16]> for Mat4<T> {
  fn as_mut(&mut self) -> &mut [T; 16] {
    unsafe { std::mem::transmute(self) }
  }
}

impl_scalar_ops!(Mat4<usize> { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<u8>    { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<u16>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<u32>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<u64>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<isize> { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<i8>    { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<i16>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<i32>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<i64>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<f32>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });
impl_scalar_ops!(Mat4<f64>   { a1, a2, a3, a4, b1, b2, b3, b4, c1, c2, c3, c4, d1, d2, d3, d4 });

#[test]
fn diagonal_construction() {
  let m = Mat4::diagonal(3);
  let flat: [i32; 16] = m.into();
  for row in 0..4 {
    for col in 0..4 {
      assert_eq!(flat[row * 4 + col], if row == col { 3 } else { 0 });
    }
  }
}

#[test]
fn default_is_identity() {
  assert_eq!(Mat4::<f32>::default(), Mat4::identity());
}

#[test]
fn element_access() {
  let mut m = Mat4::<i32>::identity();
  assert_eq!(m[(0, 0)], 1);
  assert_eq!(m[(0, 1)], 0);
  m[(2, 3)] = 7;
  assert_eq!(m[(2, 3)], 7);
}

#[test]
#[should_panic(expected = "out of range")]
fn element_access_out_of_range() {
  let m = Mat4::<i32>::identity();
  let _ = m[(0, 4)];
}

#[test]
fn elementwise_add_sub() {
  let a = Mat4::diagonal(2);
  let b = Mat4::<i32>::identity();
  assert_eq!(a + b, Mat4::diagonal(3));
  assert_eq!(a - b, Mat4::identity());
}

#[test]
fn additive_inverse() {
  #[rustfmt::skip]
  let a = Mat4::new(
    1, -2, 3, -4,
    5, -6, 7, -8,
    9, 10, 11, 12,
    13, 14, 15, 16,
  );
  assert_eq!(a - a, Mat4::zero());
}

#[test]
fn scalar_scale_both_orders() {
  let m = Mat4::<i64>::diagonal(3);
  assert_eq!(m * 2, Mat4::diagonal(6));
  assert_eq!(2 * m, m * 2);
}

#[test]
fn identity_is_multiplicative_neutral() {
  #[rustfmt::skip]
  let a = Mat4::new(
    1.0f64, 2.0, 3.0, 4.0,
    5.0, 6.0, 7.0, 8.0,
    9.0, 10.0, 11.0, 12.0,
    13.0, 14.0, 15.0, 16.0,
  );
  assert_eq!(a * Mat4::identity(), a);
  assert_eq!(Mat4::<f64>::identity() * a, a);
}

#[test]
fn product_associativity() {
  #[rustfmt::skip]
  let a = Mat4::<i64>::new(
    1, 2, 0, -1,
    3, 1, 2, 0,
    0, -2, 1, 4,
    2, 0, 3, 1,
  );
  #[rustfmt::skip]
  let b = Mat4::<i64>::new(
    2, 0, 1, 1,
    -1, 3, 0, 2,
    4, 1, -2, 0,
    0, 2, 1, 3,
  );
  #[rustfmt::skip]
  let c = Mat4::<i64>::new(
    1, -1, 0, 2,
    0, 2, 3, -1,
    5, 0, 1, 0,
    -2, 1, 0, 4,
  );
  assert_eq!((a * b) * c, a * (b * c));
}

#[test]
fn scaled_identity_times_vector() {
  let m = Mat4::diagonal(2);
  assert_eq!(m * crate::vec4(1, 2, 3, 4), crate::vec4(2, 4, 6, 8));
}

// cgmath stores column-major, so feeding it our row-major rows builds
// the transpose
#[cfg(test)]
fn to_cgmath_transposed(m: Mat4<f64>) -> cgmath::Matrix4<f64> {
  let f: [f64; 16] = m.into();
  cgmath::Matrix4::from([
    [f[0], f[1], f[2], f[3]],
    [f[4], f[5], f[6], f[7]],
    [f[8], f[9], f[10], f[11]],
    [f[12], f[13], f[14], f[15]],
  ])
}

#[test]
fn mul_matches_cgmath() {
  #[rustfmt::skip]
  let a = Mat4::new(
    1.0f64, 2.0, 3.0, 4.0,
    5.0, 6.0, 7.0, 8.0,
    9.0, 10.0, 11.0, 12.0,
    13.0, 14.0, 15.0, 16.0,
  );
  #[rustfmt::skip]
  let b = Mat4::new(
    2.0f64, 0.0, 1.0, -1.0,
    3.0, 5.0, 0.0, 2.0,
    -4.0, 1.0, 6.0, 0.0,
    0.0, 2.0, -3.0, 7.0,
  );
  // transposed operands flip the product order
  let cg_product: [[f64; 4]; 4] =
    (to_cgmath_transposed(b) * to_cgmath_transposed(a)).into();
  let product: [f64; 16] = (a * b).into();
  assert_eq!(product.to_vec(), cg_product.concat());
}

#[test]
fn vector_product_matches_cgmath() {
  use cgmath::Matrix;
  #[rustfmt::skip]
  let m = Mat4::new(
    1.0f64, 2.0, 3.0, 4.0,
    5.0, 6.0, 7.0, 8.0,
    9.0, 10.0, 11.0, 12.0,
    13.0, 14.0, 15.0, 16.0,
  );
  let v = crate::vec4(1.0f64, 2.0, 3.0, 4.0);
  let cg_r = to_cgmath_transposed(m).transpose() * cgmath::vec4(1.0f64, 2.0, 3.0, 4.0);
  let r = m * v;
  assert_eq!((r.x, r.y, r.z, r.w), (cg_r.x, cg_r.y, cg_r.z, cg_r.w));
}

#[test]
fn display_format() {
  let m = Mat4::<i32>::identity();
  assert_eq!(
    m.to_string(),
    "1\t0\t0\t0\t\n0\t1\t0\t0\t\n0\t0\t1\t0\t\n0\t0\t0\t1\t\n"
  );
}

#[test]
fn parse_round_trip() {
  #[rustfmt::skip]
  let m = Mat4::<i32>::new(
    1, -2, 3, -4,
    5, -6, 7, -8,
    9, 10, 11, 12,
    13, 14, 15, 16,
  );
  let restored: Mat4<i32> = m.to_string().parse().unwrap();
  assert_eq!(restored, m);
}

#[test]
fn parse_accepts_any_whitespace() {
  let m: Mat4<i32> = "1 0 0 0\n0 1 0 0\n0 0 1 0\n0 0 0 1".parse().unwrap();
  assert_eq!(m, Mat4::identity());
}

#[test]
fn parse_rejects_short_input() {
  let err = "1 2 3 4 5".parse::<Mat4<f32>>().unwrap_err();
  assert_eq!(err, ParseMatrixError::ElementCount { found: 5 });
}

#[test]
fn parse_rejects_bad_token() {
  let err = "1 2 3 4 5 6 7 nan8 9 10 11 12 13 14 15 16"
    .parse::<Mat4<i32>>()
    .unwrap_err();
  assert_eq!(
    err,
    ParseMatrixError::InvalidScalar {
      token: "nan8".to_owned()
    }
  );
}
