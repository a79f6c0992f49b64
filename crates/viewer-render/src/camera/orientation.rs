//! ビュー行列から軌道カメラの姿勢を復元する

use viewer_core::math::Mat4;
use viewer_core::Rotation;

/// 軌道カメラのビュー行列からワールド回転（度）を取り出す
///
/// ピッチの正弦がちょうど±1のときはロール軸とヨー軸が重なり、一般式は
/// `cos(pitch) = 0` で割ることになる。その場合ロールを0に固定し、回転はすべてヨーとして返す。
pub fn rotation_from_view(view: &Mat4) -> Rotation {
    let sin_pitch = view.y_axis.z.clamp(-1.0, 1.0);
    let pitch = sin_pitch.asin();

    let (heading, roll) = if sin_pitch.abs() == 1.0 {
        let sign = if sin_pitch < 0.0 { -1.0 } else { 1.0 };
        (view.z_axis.x.atan2(-sign * view.z_axis.y), 0.0)
    } else {
        let cos_pitch = pitch.cos();
        (
            -(view.x_axis.z / cos_pitch).atan2(view.z_axis.z / cos_pitch),
            -(view.y_axis.x / cos_pitch).atan2(view.y_axis.y / cos_pitch),
        )
    };

    Rotation::new(roll.to_degrees(), pitch.to_degrees(), -heading.to_degrees())
}

/// 軌道カメラのビュー行列における視点と回転中心の距離
pub fn distance_from_origin(view: &Mat4) -> f32 {
    -view.w_axis.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewer_core::math::Vec4;

    #[test]
    fn test_identity_view() {
        let r = rotation_from_view(&Mat4::IDENTITY);
        assert_eq!(r, Rotation::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_gimbal_lock_is_finite() {
        // ピッチちょうど90度、距離6
        let view = Mat4::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, -1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -6.0, 1.0),
        );
        let r = rotation_from_view(&view);
        assert!(r.roll.is_finite() && r.pitch.is_finite() && r.yaw.is_finite());
        assert!((r.pitch - 90.0).abs() < 1e-4);
        assert_eq!(r.roll, 0.0);
        assert_eq!(distance_from_origin(&view), 6.0);
    }

    #[test]
    fn test_gimbal_lock_looking_up() {
        let view = Mat4::from_cols(
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, -1.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::W,
        );
        let r = rotation_from_view(&view);
        assert!((r.pitch + 90.0).abs() < 1e-4);
        assert!(r.yaw.is_finite());
    }
}
