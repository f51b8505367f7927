use crate::package_manager::UpdateItem;

/// 汇总后的可用更新列表
///
/// 顺序在创建后固定不变（repo → AUR → flatpak），之后只允许修改选中状态。
#[derive(Debug, Clone, Default)]
pub struct UpdateCatalog {
    items: Vec<UpdateItem>,
}

impl UpdateCatalog {
    pub fn aggregate(
        repo: Vec<UpdateItem>,
        aur: Vec<UpdateItem>,
        flatpak: Vec<UpdateItem>,
    ) -> Self {
        let items = repo
            .into_iter()
            .chain(aur)
            .chain(flatpak)
            .map(|mut item| {
                item.selected = true;
                item
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[UpdateItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 切换单个条目的选中状态，越界时忽略
    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.selected = !item.selected;
        }
    }

    pub fn select_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = true);
    }

    pub fn deselect_all(&mut self) {
        self.items.iter_mut().for_each(|item| item.selected = false);
    }

    pub fn selected_items(&self) -> Vec<&UpdateItem> {
        self.items.iter().filter(|item| item.selected).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|item| item.selected).count()
    }
}
