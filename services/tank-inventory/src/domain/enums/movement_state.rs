//! 移库单状态
//!
//! `Scheduled --[赋予执行日期]--> Completed`，Completed 为终态，不可回退

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 移库单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MovementDates", into = "MovementDates")]
pub enum MovementState {
    /// 计划中：只参与预测，尚未作用到储罐
    Scheduled { scheduled_date: DateTime<Utc> },
    /// 已完成：储罐效果已应用
    Completed {
        scheduled_date: DateTime<Utc>,
        date: DateTime<Utc>,
    },
}

/// 持久化形态：`date` 存在即为已完成
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDates {
    scheduled_date: DateTime<Utc>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

impl From<MovementDates> for MovementState {
    fn from(dates: MovementDates) -> Self {
        match dates.date {
            Some(date) => Self::Completed {
                scheduled_date: dates.scheduled_date,
                date,
            },
            None => Self::Scheduled {
                scheduled_date: dates.scheduled_date,
            },
        }
    }
}

impl From<MovementState> for MovementDates {
    fn from(state: MovementState) -> Self {
        Self {
            scheduled_date: state.scheduled_date(),
            date: state.date(),
        }
    }
}

/// 状态迁移结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// 本次调用完成了 Scheduled → Completed 迁移，需应用储罐效果
    Transitioned,
    /// 已是完成状态，仅更正执行日期
    DateCorrected,
}

impl MovementState {
    pub fn new(scheduled_date: DateTime<Utc>, date: Option<DateTime<Utc>>) -> Self {
        MovementDates {
            scheduled_date,
            date,
        }
        .into()
    }

    pub fn scheduled_date(&self) -> DateTime<Utc> {
        match self {
            Self::Scheduled { scheduled_date } | Self::Completed { scheduled_date, .. } => {
                *scheduled_date
            }
        }
    }

    /// 执行日期（仅完成状态有）
    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Scheduled { .. } => None,
            Self::Completed { date, .. } => Some(*date),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// 修改计划日期，不改变完成状态
    pub fn reschedule(&mut self, new_date: DateTime<Utc>) {
        match self {
            Self::Scheduled { scheduled_date } | Self::Completed { scheduled_date, .. } => {
                *scheduled_date = new_date;
            }
        }
    }

    /// 赋予执行日期
    pub fn complete(&mut self, at: DateTime<Utc>) -> Completion {
        match *self {
            Self::Scheduled { scheduled_date } => {
                *self = Self::Completed {
                    scheduled_date,
                    date: at,
                };
                Completion::Transitioned
            }
            Self::Completed { scheduled_date, .. } => {
                *self = Self::Completed {
                    scheduled_date,
                    date: at,
                };
                Completion::DateCorrected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_complete_transitions_exactly_once() {
        let mut state = MovementState::new(day(1), None);
        assert!(!state.is_completed());

        assert_eq!(state.complete(day(2)), Completion::Transitioned);
        assert_eq!(state.date(), Some(day(2)));

        assert_eq!(state.complete(day(3)), Completion::DateCorrected);
        assert_eq!(state.date(), Some(day(3)));
        assert_eq!(state.scheduled_date(), day(1));
    }

    #[test]
    fn test_reschedule_keeps_completion() {
        let mut state = MovementState::new(day(1), Some(day(2)));
        state.reschedule(day(5));
        assert!(state.is_completed());
        assert_eq!(state.scheduled_date(), day(5));
    }

    #[test]
    fn test_date_presence_decides_state_on_the_wire() {
        let scheduled: MovementState =
            serde_json::from_str(r#"{"scheduledDate":"2025-06-01T00:00:00Z","date":null}"#)
                .unwrap();
        assert!(!scheduled.is_completed());

        let completed: MovementState = serde_json::from_str(
            r#"{"scheduledDate":"2025-06-01T00:00:00Z","date":"2025-06-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(completed.date(), Some(day(2)));

        let json = serde_json::to_value(scheduled).unwrap();
        assert!(json["date"].is_null());
    }
}
