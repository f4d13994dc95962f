//! 习惯存储
//!
//! 分为三层：
//! - `HabitList::prepare_*`: 本地校验与 id 查找，产出 `HabitCommand`，失败时不发出任何请求
//! - `HabitService::execute`: 负责网络往返，返回待应用的 `HabitEvent`
//! - `HabitList::apply`: 纯 reducer，只在请求成功后应用
//!
//! `HabitStore` 把三者组合为一个对象；界面层持有 `HabitList` 信号，
//! 走同一条 prepare -> execute -> apply 路径。

use crate::api::HabitApi;
use crate::error::{HabitError, HabitErrorStatus, HabitResult};
use crate::request::HttpClient;
use crate::streak;
use habit_shared::{CheckPatch, DaySet, Habit, HabitPatch, Id, NewHabit, Timestamp};

// =========================================================
// 本地校验
// =========================================================

/// 通过校验的新建 / 编辑输入
#[derive(Debug, Clone, PartialEq)]
pub struct HabitDraft {
    title: String,
    days: DaySet,
    duration: u32,
}

impl HabitDraft {
    pub fn new(title: &str, days: DaySet, duration: u32) -> HabitResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HabitError::validation("Please enter a habit title."));
        }
        if days.is_empty() {
            return Err(HabitError::validation(
                "Please select at least one day for the habit.",
            ));
        }
        if duration == 0 {
            return Err(HabitError::validation("Duration must be at least one day."));
        }
        Ok(Self {
            title: title.to_string(),
            days,
            duration,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn into_new_habit(self) -> NewHabit {
        NewHabit::fresh(self.title, self.days, self.duration)
    }

    pub fn into_patch(self) -> HabitPatch {
        HabitPatch {
            body: self.title.clone(),
            title: self.title,
            days: self.days,
            duration: self.duration,
        }
    }
}

/// 已通过本地检查、等待发送的变更
#[derive(Debug, Clone, PartialEq)]
pub enum HabitCommand {
    Add(HabitDraft),
    Edit(Id, HabitDraft),
    Delete(Id),
    Check(Id, CheckPatch),
}

// =========================================================
// 纯状态与 reducer
// =========================================================

/// 已被服务端确认的变更
#[derive(Debug, Clone, PartialEq)]
pub enum HabitEvent {
    Loaded(Vec<Habit>),
    Added(Habit),
    Updated(Habit),
    Removed(Id),
}

/// 内存中的有序习惯集合，新记录在最前
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HabitList {
    habits: Vec<Habit>,
}

impl HabitList {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: &Id) -> Option<&Habit> {
        self.habits.iter().find(|h| &h.id == id)
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.get(id).is_some()
    }

    pub fn apply(&mut self, event: HabitEvent) {
        match event {
            HabitEvent::Loaded(habits) => self.habits = habits,
            HabitEvent::Added(habit) => self.habits.insert(0, habit),
            HabitEvent::Updated(habit) => {
                if let Some(slot) = self.habits.iter_mut().find(|h| h.id == habit.id) {
                    *slot = habit;
                }
            }
            HabitEvent::Removed(id) => self.habits.retain(|h| h.id != id),
        }
    }

    fn require(&self, id: &Id, op: &str) -> HabitResult<&Habit> {
        self.get(id).ok_or_else(|| {
            HabitError::not_found("Habit not found.").in_op_with(op.to_string(), id.to_string())
        })
    }

    pub fn prepare_add(&self, title: &str, days: DaySet, duration: u32) -> HabitResult<HabitCommand> {
        let draft = HabitDraft::new(title, days, duration).map_err(|e| e.in_op("habits.add"))?;
        Ok(HabitCommand::Add(draft))
    }

    /// 先查 id 再校验输入：对不存在的记录不报告输入错误
    pub fn prepare_edit(
        &self,
        id: &Id,
        title: &str,
        days: DaySet,
        duration: u32,
    ) -> HabitResult<HabitCommand> {
        self.require(id, "habits.edit")?;
        let draft = HabitDraft::new(title, days, duration)
            .map_err(|e| e.in_op_with("habits.edit", id.to_string()))?;
        Ok(HabitCommand::Edit(id.clone(), draft))
    }

    pub fn prepare_delete(&self, id: &Id) -> HabitResult<HabitCommand> {
        self.require(id, "habits.delete")?;
        Ok(HabitCommand::Delete(id.clone()))
    }

    /// 冷却期内返回 `Ok(None)`
    pub fn prepare_toggle(&self, id: &Id, now: Timestamp) -> HabitResult<Option<HabitCommand>> {
        let habit = self.require(id, "habits.toggle")?;
        match streak::toggle(habit, now) {
            Some(patch) => Ok(Some(HabitCommand::Check(id.clone(), patch))),
            None => {
                log::debug!("toggle of habit {} dropped during cool-down", id);
                Ok(None)
            }
        }
    }
}

// =========================================================
// 网络往返
// =========================================================

/// 习惯接口操作，每个方法返回成功后应应用的事件
#[derive(Clone)]
pub struct HabitService<C> {
    api: HabitApi<C>,
}

impl<C: HttpClient> HabitService<C> {
    pub fn new(api: HabitApi<C>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> HabitResult<HabitEvent> {
        let habits = self
            .api
            .list_habits()
            .await
            .map_err(|e| e.in_op("habits.list"))?;
        log::debug!("fetched {} habits", habits.len());
        Ok(HabitEvent::Loaded(habits))
    }

    pub async fn execute(&self, command: HabitCommand) -> HabitResult<HabitEvent> {
        match command {
            HabitCommand::Add(draft) => {
                let title = draft.title().to_string();
                let created = self
                    .api
                    .create_habit(&draft.into_new_habit())
                    .await
                    .map_err(|e| e.in_op_with("habits.add", title))?;
                Ok(HabitEvent::Added(created))
            }
            HabitCommand::Edit(id, draft) => {
                let updated = self
                    .api
                    .update_habit(id.clone(), draft.into_patch())
                    .await
                    .map_err(|e| e.in_op_with("habits.edit", id.to_string()))?;
                Ok(HabitEvent::Updated(updated))
            }
            HabitCommand::Delete(id) => self.delete(id).await,
            HabitCommand::Check(id, patch) => {
                let updated = self
                    .api
                    .set_check(id.clone(), patch)
                    .await
                    .map_err(|e| e.in_op_with("habits.toggle", id.to_string()))?;
                Ok(HabitEvent::Updated(updated))
            }
        }
    }

    /// 删除后该 id 不存在即为成功，因此 404 同样视为成功
    async fn delete(&self, id: Id) -> HabitResult<HabitEvent> {
        match self.api.delete_habit(id.clone()).await {
            Ok(()) => {}
            Err(e) if e.status == HabitErrorStatus::NotFound => {
                log::info!("habit {} already absent on server", id);
            }
            Err(e) => return Err(e.in_op_with("habits.delete", id.to_string())),
        }
        Ok(HabitEvent::Removed(id))
    }
}

// =========================================================
// 组合存储
// =========================================================

/// 会话期间的习惯存储
///
/// 所有变更先完成网络往返再应用；失败时保留之前的状态。
pub struct HabitStore<C> {
    list: HabitList,
    service: HabitService<C>,
}

impl<C: HttpClient> HabitStore<C> {
    pub fn new(api: HabitApi<C>) -> Self {
        Self {
            list: HabitList::default(),
            service: HabitService::new(api),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        self.list.habits()
    }

    pub fn list_state(&self) -> &HabitList {
        &self.list
    }

    fn commit(&mut self, result: HabitResult<HabitEvent>) -> HabitResult<()> {
        match result {
            Ok(event) => {
                self.list.apply(event);
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                Err(e)
            }
        }
    }

    async fn run(&mut self, command: HabitCommand) -> HabitResult<()> {
        let result = self.service.execute(command).await;
        self.commit(result)
    }

    pub async fn list(&mut self) -> HabitResult<&[Habit]> {
        let result = self.service.list().await;
        self.commit(result)?;
        Ok(self.list.habits())
    }

    pub async fn add(&mut self, title: &str, days: DaySet, duration: u32) -> HabitResult<()> {
        let command = self.list.prepare_add(title, days, duration)?;
        self.run(command).await
    }

    pub async fn edit(&mut self, id: &Id, title: &str, days: DaySet, duration: u32) -> HabitResult<()> {
        let command = self.list.prepare_edit(id, title, days, duration)?;
        self.run(command).await
    }

    pub async fn delete(&mut self, id: &Id) -> HabitResult<()> {
        let command = self.list.prepare_delete(id)?;
        self.run(command).await
    }

    /// 返回是否真正发生了切换（冷却期内为 `false`）
    pub async fn toggle_check(&mut self, id: &Id, now: Timestamp) -> HabitResult<bool> {
        let Some(command) = self.list.prepare_toggle(id, now)? else {
            return Ok(false);
        };
        self.run(command).await?;
        Ok(true)
    }
}
