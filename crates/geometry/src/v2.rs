//! A 2-dimensional vector/point.
//!
//! Cells are addressed with `V2<i32>` and pixels with `V2<f64>`.
use num::Num;

#[derive(Debug, Default, Copy, Clone, Eq, Ord, PartialEq, PartialOrd, Hash, derive_more::Display)]
#[display(fmt = "({}, {})", x, y)]
pub struct V2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Num> V2<T> {
    pub const fn new(x: T, y: T) -> Self {
        V2 { x, y }
    }
}

impl<T> V2<T>
where
    T: Num + Copy,
    f64: From<T>,
{
    /// Widen to a pixel-space vector.
    pub fn to_f64(self) -> V2<f64> {
        V2 {
            x: self.x.into(),
            y: self.y.into(),
        }
    }
}

impl V2<f64> {
    /// Floor both components toward negative infinity.
    ///
    /// Returns `None` if either component is non-finite or would not fit in an `i32`; the caller gets an explicit
    /// invalid value rather than a saturated one.
    pub fn floor_to_i32(self) -> Option<V2<i32>> {
        fn floor_one(v: f64) -> Option<i32> {
            let f = v.floor();
            if !f.is_finite() || f < i32::MIN as f64 || f > i32::MAX as f64 {
                return None;
            }
            Some(f as i32)
        }

        Some(V2 {
            x: floor_one(self.x)?,
            y: floor_one(self.y)?,
        })
    }
}

impl<T: Num> std::ops::Add for V2<T> {
    type Output = V2<T>;

    fn add(self, rhs: V2<T>) -> V2<T> {
        V2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T: Num + Copy> std::ops::AddAssign for V2<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
    }
}

impl<T: Num> std::ops::Sub for V2<T> {
    type Output = V2<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        V2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T: Num + Copy> std::ops::SubAssign for V2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x = self.x - rhs.x;
        self.y = self.y - rhs.y;
    }
}

impl<T: Copy> std::ops::Mul<f64> for V2<T>
where
    f64: From<T>,
{
    type Output = V2<f64>;

    fn mul(self, rhs: f64) -> Self::Output {
        V2 {
            x: f64::from(self.x) * rhs,
            y: f64::from(self.y) * rhs,
        }
    }
}

impl<T: Copy> std::ops::Div<f64> for V2<T>
where
    f64: From<T>,
{
    type Output = V2<f64>;

    fn div(self, rhs: f64) -> Self::Output {
        V2 {
            x: f64::from(self.x) / rhs,
            y: f64::from(self.y) / rhs,
        }
    }
}

impl<T: std::ops::Neg> std::ops::Neg for V2<T> {
    type Output = V2<<T as std::ops::Neg>::Output>;

    fn neg(self) -> Self::Output {
        V2 {
            x: -self.x,
            y: -self.y,
        }
    }
}
