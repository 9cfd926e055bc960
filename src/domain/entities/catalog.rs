#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub unique: bool,
    pub numeric: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Every master-data screen is this catalog plus the one generic page; the
/// backend exposes one REST collection per entry.
pub const MASTER_ENTITIES: &[EntityDescriptor] = &[
    EntityDescriptor {
        key: "currency",
        label: "幣別",
        collection: "currencies",
        fields: &[
            FieldSpec {
                key: "currencyName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "symbol",
                label: "符號",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "exchangeRate",
                label: "匯率",
                required: true,
                unique: false,
                numeric: true,
            },
        ],
    },
    EntityDescriptor {
        key: "language",
        label: "語言",
        collection: "languages",
        fields: &[
            FieldSpec {
                key: "languageName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "languageCode",
                label: "代碼",
                required: true,
                unique: true,
                numeric: false,
            },
        ],
    },
    EntityDescriptor {
        key: "department",
        label: "部門",
        collection: "departments",
        fields: &[
            FieldSpec {
                key: "departmentName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "note",
                label: "備註",
                required: false,
                unique: false,
                numeric: false,
            },
        ],
    },
    EntityDescriptor {
        key: "designation",
        label: "職稱",
        collection: "designations",
        fields: &[FieldSpec {
            key: "designationName",
            label: "名稱",
            required: true,
            unique: true,
            numeric: false,
        }],
    },
    EntityDescriptor {
        key: "expense-category",
        label: "費用類別",
        collection: "expense-categories",
        fields: &[
            FieldSpec {
                key: "categoryName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "description",
                label: "說明",
                required: false,
                unique: false,
                numeric: false,
            },
        ],
    },
    EntityDescriptor {
        key: "unit",
        label: "計量單位",
        collection: "units",
        fields: &[
            FieldSpec {
                key: "unitName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "unitSymbol",
                label: "符號",
                required: true,
                unique: true,
                numeric: false,
            },
        ],
    },
    EntityDescriptor {
        key: "item-category",
        label: "品項類別",
        collection: "item-categories",
        fields: &[
            FieldSpec {
                key: "categoryName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "description",
                label: "說明",
                required: false,
                unique: false,
                numeric: false,
            },
        ],
    },
    EntityDescriptor {
        key: "meeting-room",
        label: "會議室",
        collection: "meeting-rooms",
        fields: &[
            FieldSpec {
                key: "roomName",
                label: "名稱",
                required: true,
                unique: true,
                numeric: false,
            },
            FieldSpec {
                key: "capacity",
                label: "容納人數",
                required: true,
                unique: false,
                numeric: true,
            },
        ],
    },
];

pub fn entity_by_key(key: &str) -> Option<&'static EntityDescriptor> {
    MASTER_ENTITIES.iter().find(|entity| entity.key == key)
}
