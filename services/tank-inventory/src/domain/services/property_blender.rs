//! 属性调和
//!
//! 两份油品混合时，按体积加权计算各项属性

use std::collections::{HashMap, HashSet};

use tankfarm_domain_core::{Volume, round3};

use crate::domain::value_objects::{PropertyId, PropertyValue};

/// 属性调和器（纯函数，无副作用）
pub struct PropertyBlender;

impl PropertyBlender {
    /// 计算罐内油与加入油混合后的属性
    ///
    /// 规则:
    /// 1. 总体积为 0 时无法加权，优先返回加入油的属性，其次罐内属性
    /// 2. 两侧都有值: `(Vt·vt + Va·va) / (Vt + Va)`
    /// 3. 只有一侧有值且该侧体积 > 0: 按未知值为 0 稀释
    /// 4. 其余情况保持未知
    ///
    /// 结果保留 3 位小数。输出顺序为罐内属性在前、新增属性在后，调用方不应依赖顺序。
    pub fn blend(
        tank_volume: Volume,
        tank_properties: &[PropertyValue],
        added_volume: Volume,
        added_properties: &[PropertyValue],
    ) -> Vec<PropertyValue> {
        let tank_volume = tank_volume.value();
        let added_volume = added_volume.value();
        let total_volume = tank_volume + added_volume;

        if total_volume == 0.0 {
            return if added_properties.is_empty() {
                tank_properties.to_vec()
            } else {
                added_properties.to_vec()
            };
        }

        let tank_values = value_map(tank_properties);
        let added_values = value_map(added_properties);

        union_ids(tank_properties, added_properties)
            .into_iter()
            .map(|property_id| {
                let tank_value = tank_values.get(property_id).copied().flatten();
                let added_value = added_values.get(property_id).copied().flatten();

                let blended = match (tank_value, added_value) {
                    (Some(t), Some(a)) => Some((tank_volume * t + added_volume * a) / total_volume),
                    (Some(t), None) if tank_volume > 0.0 => Some((tank_volume * t) / total_volume),
                    (None, Some(a)) if added_volume > 0.0 => {
                        Some((added_volume * a) / total_volume)
                    }
                    _ => None,
                };

                PropertyValue::new(property_id.clone(), blended.map(round3))
            })
            .collect()
    }
}

/// 同一属性出现多次时以最后一次为准
fn value_map(properties: &[PropertyValue]) -> HashMap<&PropertyId, Option<f64>> {
    properties
        .iter()
        .map(|p| (&p.property_id, p.value))
        .collect()
}

fn union_ids<'a>(first: &'a [PropertyValue], second: &'a [PropertyValue]) -> Vec<&'a PropertyId> {
    let mut seen = HashSet::new();
    first
        .iter()
        .chain(second)
        .map(|p| &p.property_id)
        .filter(|id| seen.insert(*id))
        .collect()
}
