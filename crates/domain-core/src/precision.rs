//! 小数精度

/// 体积与属性值统一保留的小数位数
pub const DECIMAL_PLACES: i32 = 3;

/// 四舍五入到指定小数位（远离零方向取整）
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// 四舍五入到 3 位小数
pub fn round3(value: f64) -> f64 {
    round_to(value, DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round3() {
        assert_eq!(round3(6.666_666), 6.667);
        assert_eq!(round3(15.0), 15.0);
        assert_eq!(round3(-1.000_4), -1.0);
    }

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(1.005_1, 2), 1.01);
        assert_eq!(round_to(2.344, 2), 2.34);
    }
}
