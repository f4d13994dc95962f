//! 习惯状态上下文
//!
//! `HabitList` 放在信号中。每个变更先由 `HabitList::prepare_*` 做校验和查找，
//! 再交给核心库的 `HabitService::execute`，成功后把返回的事件应用到信号；
//! 失败时保留原状态：校验错误弹出提示框，其余错误写入 `error`。

use crate::auth::use_auth;
use crate::config;
use crate::web::{FetchClient, alert};
use habit_shared::{DaySet, Habit, Id, Timestamp};
use habit_tracker::api::HabitApi;
use habit_tracker::error::{HabitError, HabitResult};
use habit_tracker::habits::{HabitCommand, HabitList, HabitService};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct HabitsContext {
    pub list: RwSignal<HabitList>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    token: Signal<Option<String>>,
}

impl HabitsContext {
    pub fn new(token: Signal<Option<String>>) -> Self {
        Self {
            list: RwSignal::new(HabitList::default()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            token,
        }
    }

    fn service(&self) -> Option<HabitService<FetchClient>> {
        let token = self.token.get_untracked()?;
        Some(HabitService::new(HabitApi::new(FetchClient, config(), token)))
    }

    fn report(&self, e: HabitError) {
        log::error!("{}", e);
        if e.is_validation() {
            alert(e.message());
        } else {
            self.error.set(Some(e.message().to_string()));
        }
    }

    /// prepare -> execute -> apply，返回是否已应用
    async fn run(self, prepared: HabitResult<Option<HabitCommand>>) -> bool {
        let command = match prepared {
            Ok(Some(command)) => command,
            Ok(None) => return false,
            Err(e) => {
                self.report(e);
                return false;
            }
        };
        let Some(service) = self.service() else {
            return false;
        };
        match service.execute(command).await {
            Ok(event) => {
                self.list.update(|list| list.apply(event));
                self.error.set(None);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    pub async fn refresh(self) {
        let Some(service) = self.service() else {
            return;
        };
        self.loading.set(true);
        match service.list().await {
            Ok(event) => {
                self.list.update(|list| list.apply(event));
                self.error.set(None);
            }
            Err(e) => self.report(e),
        }
        self.loading.set(false);
    }

    pub async fn add(self, title: String, days: DaySet, duration: u32) -> bool {
        let prepared = self
            .list
            .with_untracked(|l| l.prepare_add(&title, days, duration).map(Some));
        self.run(prepared).await
    }

    pub async fn edit(self, id: Id, title: String, days: DaySet, duration: u32) -> bool {
        let prepared = self
            .list
            .with_untracked(|l| l.prepare_edit(&id, &title, days, duration).map(Some));
        self.run(prepared).await
    }

    pub async fn delete(self, id: Id) -> bool {
        let prepared = self.list.with_untracked(|l| l.prepare_delete(&id).map(Some));
        self.run(prepared).await
    }

    pub async fn toggle(self, id: Id) {
        let prepared = self
            .list
            .with_untracked(|l| l.prepare_toggle(&id, Timestamp::now()));
        self.run(prepared).await;
    }

    /// 当前打卡状态，随列表变化
    pub fn is_checked(&self, id: &Id) -> bool {
        self.list.with(|l| l.get(id).is_some_and(|h| h.checked))
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.list.with(|l| l.habits().to_vec())
    }
}

pub fn provide_habits() -> HabitsContext {
    let ctx = HabitsContext::new(use_auth().token_signal());
    provide_context(ctx);
    ctx
}

pub fn use_habits() -> HabitsContext {
    use_context::<HabitsContext>().expect("HabitsContext should be provided")
}
