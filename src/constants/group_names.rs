// 订阅里常见的分组名 -> 俄语名称, order matters for substring lookup
pub const GROUP_NAME_TABLE: [(&str, &str); 32] = [
    ("节点选择", "Выбор"),
    ("自动选择", "Авто"),
    ("故障转移", "Отказоустойчивость"),
    ("负载均衡", "Балансировка"),
    ("全球直连", "Прямое"),
    ("广告拦截", "Реклама"),
    ("漏网之鱼", "Остальное"),
    ("香港节点", "Гонконг"),
    ("日本节点", "Япония"),
    ("新加坡节点", "Сингапур"),
    ("台湾节点", "Тайвань"),
    ("美国节点", "США"),
    ("韩国节点", "Корея"),
    ("英国节点", "Великобритания"),
    ("德国节点", "Германия"),
    ("法国节点", "Франция"),
    ("俄罗斯节点", "Россия"),
    ("荷兰节点", "Нидерланды"),
    ("加拿大节点", "Канада"),
    ("澳大利亚节点", "Австралия"),
    ("印度节点", "Индия"),
    ("土耳其节点", "Турция"),
    ("巴西节点", "Бразилия"),
    ("阿根廷节点", "Аргентина"),
    ("其他节点", "Прочие"),
    ("低倍率节点", "Низкий множитель"),
    ("高倍率节点", "Высокий множитель"),
    ("专线节点", "Выделенная линия"),
    ("游戏节点", "Игры"),
    ("流媒体", "Стриминг"),
    ("解锁", "Разблокировка"),
    ("国际流媒体", "Стриминг"),
];

/// Label of the manual selector group, preferred as the catch-all target
pub const SELECTOR_LABEL: &str = "Выбор";
