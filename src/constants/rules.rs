/// Local-network bypass rules emitted ahead of the catch-all rule
pub const LOCAL_RULES: [&str; 8] = [
    "IP-CIDR,192.168.0.0/16,DIRECT,no-resolve",
    "IP-CIDR,10.0.0.0/8,DIRECT,no-resolve",
    "IP-CIDR,172.16.0.0/12,DIRECT,no-resolve",
    "IP-CIDR,127.0.0.0/8,DIRECT,no-resolve",
    "IP-CIDR,169.254.0.0/16,DIRECT,no-resolve",
    "DOMAIN-SUFFIX,localhost,DIRECT",
    "DOMAIN-SUFFIX,local,DIRECT",
    "DOMAIN-SUFFIX,lan,DIRECT",
];

/// Builds the catch-all rule routing everything left to `group`
pub fn match_rule(group: &str) -> String {
    format!("MATCH,{}", group)
}
