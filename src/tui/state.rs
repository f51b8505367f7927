use super::input::Action;
use crate::catalog::UpdateCatalog;
use crate::package_manager::ResultItem;

// ========== 枚举 ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Confirming,
    Executing,
    Reporting,
}

/// 浏览模式下的焦点：列表，或按钮栏中的第 n 个按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Buttons(usize),
}

/// 当前阶段；确认 / 结果阶段焦点固定在按钮栏
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing(Focus),
    Confirming { button: usize },
    Executing,
    Reporting { button: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    SelectAll,
    DeselectAll,
    Update,
    Exit,
    ConfirmUpdate,
    GoBack,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::SelectAll => "Select All",
            Button::DeselectAll => "Deselect All",
            Button::Update => "Update",
            Button::Exit => "Exit",
            Button::ConfirmUpdate => "Yes, Update",
            Button::GoBack => "Go Back",
        }
    }
}

const SELECT_BUTTONS: &[Button] = &[
    Button::SelectAll,
    Button::DeselectAll,
    Button::Update,
    Button::Exit,
];
const CONFIRM_BUTTONS: &[Button] = &[Button::ConfirmUpdate, Button::GoBack];
const RESULTS_BUTTONS: &[Button] = &[Button::Exit];

impl Phase {
    pub fn mode(self) -> Mode {
        match self {
            Phase::Browsing(_) => Mode::Browsing,
            Phase::Confirming { .. } => Mode::Confirming,
            Phase::Executing => Mode::Executing,
            Phase::Reporting { .. } => Mode::Reporting,
        }
    }

    /// 当前模式的按钮组
    pub fn buttons(self) -> &'static [Button] {
        match self {
            Phase::Browsing(_) => SELECT_BUTTONS,
            Phase::Confirming { .. } => CONFIRM_BUTTONS,
            Phase::Executing => &[],
            Phase::Reporting { .. } => RESULTS_BUTTONS,
        }
    }

    /// 聚焦中的按钮序号；执行阶段既没有列表也没有按钮
    pub fn button_cursor(self) -> Option<usize> {
        match self {
            Phase::Browsing(Focus::Buttons(i)) => Some(i),
            Phase::Confirming { button } | Phase::Reporting { button } => Some(button),
            Phase::Browsing(Focus::List) | Phase::Executing => None,
        }
    }

    pub fn list_focused(self) -> bool {
        self == Phase::Browsing(Focus::List)
    }

    fn with_button(self, button: usize) -> Self {
        match self {
            Phase::Browsing(Focus::Buttons(_)) => Phase::Browsing(Focus::Buttons(button)),
            Phase::Confirming { .. } => Phase::Confirming { button },
            Phase::Reporting { .. } => Phase::Reporting { button },
            other => other,
        }
    }
}

/// 一次按键处理之后交互循环要做的事
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// 确认更新，交给执行器
    Execute,
    Quit,
}

// ========== App ==========

pub struct App {
    pub catalog: UpdateCatalog,
    phase: Phase,
    cursor: usize,
    scroll: usize,
    page_size: usize,
    results: Vec<ResultItem>,
}

impl App {
    pub fn new(catalog: UpdateCatalog, page_size: usize) -> Self {
        Self {
            catalog,
            phase: Phase::Browsing(Focus::List),
            cursor: 0,
            scroll: 0,
            page_size: page_size.max(1),
            results: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.phase.mode()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    /// 终端尺寸变化后重新计算页大小，保证光标仍可见
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.ensure_cursor_visible();
    }

    /// 按钮是否可用：没有选中任何包时 Update 不可用
    pub fn button_enabled(&self, button: Button) -> bool {
        button != Button::Update || self.catalog.selected_count() > 0
    }

    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::Quit => return Outcome::Quit,
            Action::Up => self.move_up(),
            Action::Down => self.move_down(),
            Action::Left => self.move_button(-1),
            Action::Right => self.move_button(1),
            Action::PageUp => {
                if self.phase.list_focused() {
                    self.move_cursor(-(self.page_size as isize));
                }
            }
            Action::PageDown => {
                if self.phase.list_focused() {
                    self.move_cursor(self.page_size as isize);
                }
            }
            Action::Home => {
                if self.phase.list_focused() {
                    self.jump_to_first();
                }
            }
            Action::End => {
                if self.phase.list_focused() {
                    self.jump_to_last();
                }
            }
            Action::Select => match self.phase {
                Phase::Browsing(Focus::List) => self.catalog.toggle(self.cursor),
                Phase::Browsing(Focus::Buttons(i)) => return self.activate(i),
                _ => {}
            },
            Action::Activate => match self.phase {
                Phase::Browsing(Focus::List) => self.catalog.toggle(self.cursor),
                phase => {
                    if let Some(i) = phase.button_cursor() {
                        return self.activate(i);
                    }
                }
            },
        }
        Outcome::Continue
    }

    /// 进入执行阶段（仅在确认阶段有效）
    pub fn begin_execution(&mut self) {
        if self.mode() == Mode::Confirming {
            self.phase = Phase::Executing;
        }
    }

    /// 执行完成，进入结果阶段
    pub fn finish_execution(&mut self, results: Vec<ResultItem>) {
        self.results = results;
        self.phase = Phase::Reporting { button: 0 };
    }

    fn activate(&mut self, index: usize) -> Outcome {
        let Some(&button) = self.phase.buttons().get(index) else {
            return Outcome::Continue;
        };
        match button {
            Button::SelectAll => {
                self.catalog.select_all();
                self.phase = Phase::Browsing(Focus::List);
            }
            Button::DeselectAll => {
                self.catalog.deselect_all();
                self.phase = Phase::Browsing(Focus::List);
            }
            Button::Update => {
                if self.catalog.selected_count() > 0 {
                    self.phase = Phase::Confirming { button: 0 };
                }
            }
            Button::Exit => return Outcome::Quit,
            Button::ConfirmUpdate => return Outcome::Execute,
            Button::GoBack => {
                self.phase = Phase::Browsing(Focus::List);
                self.ensure_cursor_visible();
            }
        }
        Outcome::Continue
    }

    fn move_up(&mut self) {
        match self.phase {
            Phase::Browsing(Focus::Buttons(_)) if !self.catalog.is_empty() => {
                self.phase = Phase::Browsing(Focus::List);
                self.jump_to_last();
            }
            Phase::Browsing(Focus::List) => self.move_cursor(-1),
            _ => {}
        }
    }

    fn move_down(&mut self) {
        if !self.phase.list_focused() {
            return;
        }
        if self.catalog.is_empty() || self.cursor + 1 >= self.catalog.len() {
            self.phase = Phase::Browsing(Focus::Buttons(0));
        } else {
            self.move_cursor(1);
        }
    }

    fn move_button(&mut self, delta: isize) {
        let Some(current) = self.phase.button_cursor() else {
            return;
        };
        let last = self.phase.buttons().len().saturating_sub(1) as isize;
        let next = (current as isize + delta).clamp(0, last) as usize;
        self.phase = self.phase.with_button(next);
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.catalog.is_empty() {
            return;
        }
        let last = self.catalog.len() as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, last) as usize;
        self.ensure_cursor_visible();
    }

    fn jump_to_first(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    fn jump_to_last(&mut self) {
        self.cursor = self.catalog.len().saturating_sub(1);
        self.scroll = self.catalog.len().saturating_sub(self.page_size);
    }

    /// 最小幅度调整滚动位置，使光标落在可见窗口内
    fn ensure_cursor_visible(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + self.page_size {
            self.scroll = self.cursor + 1 - self.page_size;
        }
    }
}
