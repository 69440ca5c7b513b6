//! Column ordering: merging static-order and dynamic-order specifications
//! into one deterministic left-to-right layout.

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Normalizes dynamic-header order numbers.
///
/// Receives each discovered dynamic header with its 1-based discovery
/// position; the returned map is used as the explicit order for dynamic
/// headers. Headers absent from the returned map stay unordered.
pub type DynamicOrderFn = Box<dyn Fn(&IndexMap<String, u32>) -> BTreeMap<String, u32> + Send + Sync>;

/// Where a static header should sort, if anywhere.
pub enum StaticOrder {
    Map(BTreeMap<String, u32>),
    Func(Box<dyn Fn(&str) -> Option<u32> + Send + Sync>),
}

impl StaticOrder {
    pub fn resolve(&self, header: &str) -> Option<u32> {
        match self {
            Self::Map(map) => map.get(header).copied(),
            Self::Func(f) => f(header),
        }
    }
}

/// Caller-specified column ordering, consumed once per encode call.
#[derive(Default)]
pub struct ColumnOrder {
    pub static_order: Option<StaticOrder>,
    pub dynamic_order: Option<DynamicOrderFn>,
}

impl ColumnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static_map(mut self, map: BTreeMap<String, u32>) -> Self {
        self.static_order = Some(StaticOrder::Map(map));
        self
    }

    pub fn with_static_fn(mut self, f: impl Fn(&str) -> Option<u32> + Send + Sync + 'static) -> Self {
        self.static_order = Some(StaticOrder::Func(Box::new(f)));
        self
    }

    pub fn with_dynamic_fn(
        mut self,
        f: impl Fn(&IndexMap<String, u32>) -> BTreeMap<String, u32> + Send + Sync + 'static,
    ) -> Self {
        self.dynamic_order = Some(Box::new(f));
        self
    }
}

/// Produce the final left-to-right header sequence.
///
/// Static and dynamic order numbers share one space: every header with an
/// explicit number is placed by ascending number, ties broken alphabetically,
/// so a dynamic header may interleave ahead of a static one. Headers with no
/// explicit number follow, static headers first in declaration order, then
/// dynamic headers in discovery order.
pub fn plan(
    static_headers: &[&str],
    dynamic_headers: &[String],
    order: Option<&ColumnOrder>,
) -> Vec<String> {
    let static_order = order.and_then(|o| o.static_order.as_ref());
    let dynamic_order = order.and_then(|o| o.dynamic_order.as_ref());

    let mut numbered: Vec<(u32, &str)> = Vec::new();
    let mut unordered: Vec<&str> = Vec::new();

    for &header in static_headers {
        match static_order.and_then(|spec| spec.resolve(header)) {
            Some(number) => numbered.push((number, header)),
            None => unordered.push(header),
        }
    }

    let dynamic_numbers: BTreeMap<String, u32> = match dynamic_order {
        Some(normalize) => {
            let positions: IndexMap<String, u32> = dynamic_headers
                .iter()
                .enumerate()
                .map(|(idx, header)| (header.clone(), idx as u32 + 1))
                .collect();
            normalize(&positions)
        }
        None => BTreeMap::new(),
    };
    for header in dynamic_headers {
        match dynamic_numbers.get(header) {
            Some(&number) => numbered.push((number, header)),
            None => unordered.push(header),
        }
    }

    numbered.sort_by(|(a_num, a_header), (b_num, b_header)| {
        a_num.cmp(b_num).then_with(|| a_header.cmp(b_header))
    });

    numbered
        .into_iter()
        .map(|(_, header)| header.to_string())
        .chain(unordered.into_iter().map(str::to_string))
        .collect()
}
